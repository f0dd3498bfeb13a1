//! Instances of product and singleton types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{AdtError, AdtResult};
use crate::method::Method;
use crate::symbol::Symbol;
use crate::types::{AdtType, VariantType};
use crate::union::{UnionType, constant_union, is_member};
use crate::value::Value;

/// An immutable value of a product or singleton type.
///
/// Equality is structural but type-exact: two instances are equal only when
/// they belong to the same type and their slots are equal. Field updates go
/// through [`Instance::with_`], which returns a new instance.
#[derive(Clone)]
pub struct Instance(Arc<InstanceData>);

struct InstanceData {
    variant: VariantType,
    slots: Box<[Value]>,
}

impl Instance {
    pub(crate) fn new(variant: VariantType, slots: Box<[Value]>) -> Self {
        Instance(Arc::new(InstanceData { variant, slots }))
    }

    pub fn variant(&self) -> &VariantType {
        &self.0.variant
    }

    pub fn type_name(&self) -> Symbol {
        self.0.variant.name()
    }

    /// Slot values in declared field order.
    pub fn slots(&self) -> &[Value] {
        &self.0.slots
    }

    pub fn field_at(&self, index: usize) -> Option<&Value> {
        self.0.slots.get(index)
    }

    pub fn get(&self, field: &str) -> AdtResult<&Value> {
        let product = self.0.variant.as_product();
        Symbol::lookup(field)
            .and_then(|name| product?.fields().position(name))
            .map(|index| &self.0.slots[index])
            .ok_or_else(|| AdtError::unknown_field(self.type_name(), field))
    }

    /// `(field name, value)` pairs in declared order. Empty for singletons.
    pub fn fields(&self) -> impl Iterator<Item = (Symbol, &Value)> + '_ {
        let names = self
            .0
            .variant
            .as_product()
            .into_iter()
            .flat_map(|ty| ty.fields().names());
        names.zip(self.0.slots.iter())
    }

    /// Copy of this instance with the named fields replaced.
    ///
    /// The receiver is never modified. Fails with an unknown-field error if a
    /// name is not a field of this instance's type.
    pub fn with_<K, V>(&self, updates: impl IntoIterator<Item = (K, V)>) -> AdtResult<Instance>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        let updates: Vec<(Symbol, Value)> = updates
            .into_iter()
            .map(|(name, value)| {
                let name = name.as_ref();
                Symbol::lookup(name)
                    .map(|sym| (sym, value.into()))
                    .ok_or_else(|| AdtError::unknown_field(self.type_name(), name))
            })
            .collect::<AdtResult<_>>()?;
        match &self.0.variant {
            VariantType::Product(ty) => ty.update(self, updates),
            VariantType::Singleton(_) => match updates.first() {
                Some((name, _)) => Err(AdtError::unknown_field(self.type_name(), name)),
                None => Ok(self.clone()),
            },
        }
    }

    /// The union this instance belongs to, through its type or as an
    /// enumerated constant.
    pub fn union(&self) -> Option<UnionType> {
        self.0.variant.union().or_else(|| constant_union(self))
    }

    pub fn is_a(&self, ty: impl Into<AdtType>) -> bool {
        is_member(&Value::Instance(self.clone()), ty)
    }

    /// Look up a method: the instance's own type first, then its union.
    pub fn resolve_method(&self, name: Symbol) -> Option<Method> {
        if let Some(method) = self.0.variant.methods().get(name) {
            return Some(method.clone());
        }
        self.union()
            .and_then(|union| union.methods().get(name).cloned())
    }

    pub fn call(&self, method: &str, args: &[Value]) -> AdtResult<Value> {
        match Symbol::lookup(method).and_then(|name| self.resolve_method(name)) {
            Some(resolved) => resolved.invoke(self, args),
            None => Err(AdtError::unknown_method(self.type_name(), method)),
        }
    }

    /// Reference identity, as opposed to `==`.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared allocation; stable while any clone is alive.
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.0.variant.key() == other.0.variant.key() && self.0.slots == other.0.slots)
    }
}

impl Eq for Instance {}

impl Hash for Instance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.variant.key().hash(state);
        self.0.slots.hash(state);
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.variant {
            VariantType::Product(ty) => {
                write!(f, "{}(", ty.name())?;
                for (i, slot) in self.0.slots.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{slot}")?;
                }
                f.write_str(")")
            }
            VariantType::Singleton(ty) => match ty.display_override() {
                Some(name) => write!(f, "{name}"),
                None => write!(f, "{}()", ty.name()),
            },
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
