//! Product types ("structs"/"records") synthesized from a field list.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::debug;

use crate::error::{AdtError, AdtErrorKind, AdtResult};
use crate::field::{Field, FieldSpec};
use crate::instance::Instance;
use crate::method::{Method, MethodTable};
use crate::symbol::Symbol;
use crate::types::{TypeKey, VariantType};
use crate::value::Value;

/// Synthesize a product type named `name` with the given fields.
///
/// Fields may be bare names, `(name, annotation)` pairs or full [`Field`]s.
/// Fails if two fields share a name.
pub fn build_product_type<F: Into<Field>>(
    name: impl Into<Symbol>,
    fields: impl IntoIterator<Item = F>,
) -> AdtResult<ProductType> {
    ProductType::builder(name).fields(fields).build()
}

/// Handle to a synthesized product type. Cloning shares the same type identity.
#[derive(Clone)]
pub struct ProductType(Arc<ProductTypeData>);

struct ProductTypeData {
    key: TypeKey,
    name: Symbol,
    fields: FieldSpec,
    methods: MethodTable,
    enforce_annotations: bool,
}

impl ProductType {
    pub fn builder(name: impl Into<Symbol>) -> ProductTypeBuilder {
        ProductTypeBuilder {
            name: name.into(),
            fields: FieldSpec::new(),
            methods: MethodTable::new(),
            enforce_annotations: false,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.0.key
    }

    pub fn name(&self) -> Symbol {
        self.0.name
    }

    pub fn fields(&self) -> &FieldSpec {
        &self.0.fields
    }

    pub fn methods(&self) -> &MethodTable {
        &self.0.methods
    }

    /// Construct from positional field values.
    pub fn construct<V>(&self, args: impl IntoIterator<Item = V>) -> AdtResult<Instance>
    where
        V: Into<Value>,
    {
        self.call(args.into_iter().map(Into::into).collect(), Vec::new())
    }

    /// Construct from named field values.
    pub fn construct_named<K, V>(
        &self,
        args: impl IntoIterator<Item = (K, V)>,
    ) -> AdtResult<Instance>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        let named: Vec<(Symbol, Value)> = args
            .into_iter()
            .map(|(name, value)| {
                let name = name.as_ref();
                Symbol::lookup(name)
                    .map(|sym| (sym, value.into()))
                    .ok_or_else(|| AdtError::unknown_field(self.name(), name))
            })
            .collect::<AdtResult<_>>()?;
        self.call(Vec::new(), named)
    }

    /// Construct from positional values followed by named values.
    ///
    /// Positional values fill fields in declared order; named values fill the
    /// rest; unset fields fall back to their defaults.
    pub fn call(
        &self,
        positional: Vec<Value>,
        named: Vec<(Symbol, Value)>,
    ) -> AdtResult<Instance> {
        let fields = &self.0.fields;
        if positional.len() > fields.len() {
            return Err(AdtError::arity(self.name(), fields.len(), positional.len()));
        }

        let mut slots: Vec<Option<Value>> = positional.into_iter().map(Some).collect();
        slots.resize(fields.len(), None);

        for (name, value) in named {
            let index = fields
                .position(name)
                .ok_or_else(|| AdtError::unknown_field(self.name(), name))?;
            if slots[index].is_some() {
                return Err(AdtError::duplicate_argument(self.name(), name));
            }
            slots[index] = Some(value);
        }

        let slots = slots
            .into_iter()
            .zip(fields)
            .map(|(slot, field)| {
                slot.or_else(|| field.default().cloned())
                    .ok_or_else(|| AdtError::missing_field(self.name(), field.name()))
            })
            .collect::<AdtResult<Vec<_>>>()?;

        if self.0.enforce_annotations {
            self.check_slots(&slots)?;
        }
        Ok(Instance::new(VariantType::Product(self.clone()), slots.into()))
    }

    /// Check every annotated field of `instance` against its annotation.
    ///
    /// Forward references are skipped. Instances of other types are rejected
    /// with a type-mismatch error.
    pub fn validate(&self, instance: &Instance) -> AdtResult<()> {
        if instance.variant().key() != self.key() {
            return Err(AdtError::type_mismatch("an instance of the validating type", instance));
        }
        self.check_slots(instance.slots())
    }

    pub(crate) fn update(
        &self,
        instance: &Instance,
        updates: Vec<(Symbol, Value)>,
    ) -> AdtResult<Instance> {
        let mut slots = instance.slots().to_vec();
        for (name, value) in updates {
            let index = self
                .0
                .fields
                .position(name)
                .ok_or_else(|| AdtError::unknown_field(self.name(), name))?;
            slots[index] = value;
        }
        if self.0.enforce_annotations {
            self.check_slots(&slots)?;
        }
        Ok(Instance::new(VariantType::Product(self.clone()), slots.into()))
    }

    fn check_slots(&self, slots: &[Value]) -> AdtResult<()> {
        for (field, value) in self.0.fields.iter().zip(slots) {
            let Some(annotation) = field.annotation() else {
                continue;
            };
            if annotation.check(value) == Some(false) {
                return Err(AdtErrorKind::AnnotationMismatch {
                    type_name: self.name(),
                    field: field.name(),
                    expected: annotation.to_string(),
                    value: value.repr().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl PartialEq for ProductType {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ProductType {}

impl Hash for ProductType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.fields())
    }
}

pub struct ProductTypeBuilder {
    name: Symbol,
    fields: FieldSpec,
    methods: MethodTable,
    enforce_annotations: bool,
}

impl ProductTypeBuilder {
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields<F: Into<Field>>(mut self, fields: impl IntoIterator<Item = F>) -> Self {
        for field in fields {
            self.fields.push(field);
        }
        self
    }

    pub fn method(
        mut self,
        name: impl Into<Symbol>,
        f: impl Fn(&Instance, &[Value]) -> AdtResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Method::new(f));
        self
    }

    /// Reject construction and updates whose values fail a field annotation.
    pub fn enforce_annotations(mut self, enforce: bool) -> Self {
        self.enforce_annotations = enforce;
        self
    }

    pub fn build(self) -> AdtResult<ProductType> {
        self.fields.ensure_unique(self.name)?;
        let ty = ProductType(Arc::new(ProductTypeData {
            key: TypeKey::fresh(),
            name: self.name,
            fields: self.fields,
            methods: self.methods,
            enforce_annotations: self.enforce_annotations,
        }));
        debug!(name = %ty.name(), fields = ty.fields().len(), "synthesized product type");
        Ok(ty)
    }
}
