//! Field specifications for product types.
//!
//! A field is a name, an optional annotation and an optional default value.
//! Annotations are descriptive: they are only checked when a product type is
//! built with annotation enforcement, or through [`ProductType::validate`].
//!
//! [`ProductType::validate`]: crate::ProductType::validate

use std::fmt;
use std::sync::Arc;

use crate::error::{AdtError, AdtResult};
use crate::kind::Kind;
use crate::product::ProductType;
use crate::singleton::SingletonType;
use crate::symbol::Symbol;
use crate::types::AdtType;
use crate::union::{UnionType, is_member};
use crate::value::Value;

/// A runtime predicate usable as a field annotation.
///
/// Implemented by parameterized type descriptors (`List[int]`, `IntRange[2, 5]`).
pub trait TypeCheck: fmt::Display + fmt::Debug + Send + Sync {
    fn check(&self, value: &Value) -> bool;
}

#[derive(Clone, Debug)]
pub enum Annotation {
    Kind(Kind),
    Adt(AdtType),
    /// A type referenced by name before it exists, e.g. `Person` inside `Person`.
    Forward(Symbol),
    Check(Arc<dyn TypeCheck>),
}

impl Annotation {
    pub fn forward(name: impl Into<Symbol>) -> Self {
        Annotation::Forward(name.into())
    }

    pub fn custom(check: impl TypeCheck + 'static) -> Self {
        Annotation::Check(Arc::new(check))
    }

    /// Whether `value` satisfies this annotation; `None` for forward references.
    pub fn check(&self, value: &Value) -> Option<bool> {
        match self {
            Annotation::Kind(kind) => Some(kind.accepts(value)),
            Annotation::Adt(ty) => Some(is_member(value, ty)),
            Annotation::Forward(_) => None,
            Annotation::Check(check) => Some(check.check(value)),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Kind(kind) => write!(f, "{kind}"),
            Annotation::Adt(ty) => write!(f, "{ty}"),
            Annotation::Forward(name) => write!(f, "{name}"),
            Annotation::Check(check) => write!(f, "{check}"),
        }
    }
}

impl From<Kind> for Annotation {
    fn from(kind: Kind) -> Self {
        Annotation::Kind(kind)
    }
}

macro_rules! annotation_from_adt {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Annotation {
                fn from(ty: $ty) -> Self {
                    Annotation::Adt(ty.into())
                }
            }
        )*
    };
}

annotation_from_adt!(
    AdtType,
    ProductType,
    &ProductType,
    SingletonType,
    &SingletonType,
    UnionType,
    &UnionType,
);

impl From<Arc<dyn TypeCheck>> for Annotation {
    fn from(check: Arc<dyn TypeCheck>) -> Self {
        Annotation::Check(check)
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    name: Symbol,
    annotation: Option<Annotation>,
    default: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<Symbol>) -> Self {
        Field {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }

    pub fn annotated(mut self, annotation: impl Into<Annotation>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(annotation) = &self.annotation {
            write!(f, ": {annotation}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {}", default.repr())?;
        }
        Ok(())
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

impl From<Symbol> for Field {
    fn from(name: Symbol) -> Self {
        Field::new(name)
    }
}

impl<A: Into<Annotation>> From<(&str, A)> for Field {
    fn from((name, annotation): (&str, A)) -> Self {
        Field::new(name).annotated(annotation)
    }
}

/// Ordered field list of a product type. Order fixes positional construction
/// and the rendered form.
#[derive(Clone, Debug, Default)]
pub struct FieldSpec {
    fields: Vec<Field>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated list of bare field names: `"name age eye_color"`.
    pub fn parse(names: &str) -> Self {
        names.split_whitespace().map(Field::from).collect()
    }

    pub fn push(&mut self, field: impl Into<Field>) {
        self.fields.push(field.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.fields.iter().map(Field::name)
    }

    pub fn position(&self, name: Symbol) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// `(name, annotation)` pairs in declared order.
    pub fn annotations(&self) -> impl Iterator<Item = (Symbol, Option<&Annotation>)> + '_ {
        self.fields
            .iter()
            .map(|field| (field.name, field.annotation.as_ref()))
    }

    pub(crate) fn ensure_unique(&self, type_name: Symbol) -> AdtResult<()> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|prev| prev.name == field.name) {
                return Err(AdtError::duplicate_field(type_name, field.name));
            }
        }
        Ok(())
    }
}

impl<F: Into<Field>> FromIterator<F> for FieldSpec {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        FieldSpec {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldSpec {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
