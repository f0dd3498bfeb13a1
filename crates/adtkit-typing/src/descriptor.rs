//! Canonical parameterized type descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use adtkit_runtime::{
    AdtType, Annotation, Kind, ProductType, SingletonType, Symbol, TypeCheck, UnionType, Value,
    is_member,
};
use smallvec::SmallVec;

use crate::constructor::TypeConstructor;

/// One argument of a parameterized type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArg {
    Kind(Kind),
    Descriptor(TypeDescriptor),
    Adt(AdtType),
    /// A type named before it exists.
    Forward(Symbol),
    /// A value argument, as in `IntRange[2, 5]` or `Enum[1, 3, 5]`.
    Literal(Value),
}

impl TypeArg {
    pub fn forward(name: impl Into<Symbol>) -> Self {
        TypeArg::Forward(name.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        TypeArg::Literal(value.into())
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            TypeArg::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Whether `value` is described by this argument; `None` for forward references.
    ///
    /// A literal argument describes exactly the values equal to it.
    pub fn check(&self, value: &Value) -> Option<bool> {
        match self {
            TypeArg::Kind(kind) => Some(kind.accepts(value)),
            TypeArg::Descriptor(descriptor) => Some(descriptor.check(value)),
            TypeArg::Adt(ty) => Some(is_member(value, ty)),
            TypeArg::Forward(_) => None,
            TypeArg::Literal(literal) => Some(literal == value),
        }
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Kind(kind) => write!(f, "{kind}"),
            TypeArg::Descriptor(descriptor) => write!(f, "{descriptor}"),
            TypeArg::Adt(ty) => write!(f, "{ty}"),
            TypeArg::Forward(name) => write!(f, "{name}"),
            TypeArg::Literal(value) => write!(f, "{}", value.repr()),
        }
    }
}

impl From<Kind> for TypeArg {
    fn from(kind: Kind) -> Self {
        TypeArg::Kind(kind)
    }
}

impl From<TypeDescriptor> for TypeArg {
    fn from(descriptor: TypeDescriptor) -> Self {
        TypeArg::Descriptor(descriptor)
    }
}

impl From<&TypeDescriptor> for TypeArg {
    fn from(descriptor: &TypeDescriptor) -> Self {
        TypeArg::Descriptor(descriptor.clone())
    }
}

impl From<Value> for TypeArg {
    fn from(value: Value) -> Self {
        TypeArg::Literal(value)
    }
}

impl From<i64> for TypeArg {
    fn from(value: i64) -> Self {
        TypeArg::Literal(value.into())
    }
}

impl From<i32> for TypeArg {
    fn from(value: i32) -> Self {
        TypeArg::Literal(value.into())
    }
}

macro_rules! type_arg_from_adt {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TypeArg {
                fn from(ty: $ty) -> Self {
                    TypeArg::Adt(ty.into())
                }
            }
        )*
    };
}

type_arg_from_adt!(
    AdtType,
    ProductType,
    &ProductType,
    SingletonType,
    &SingletonType,
    UnionType,
    &UnionType,
);

/// A constructor with all of its arguments filled in, e.g. `List[int]`.
///
/// Descriptors are only created through [`TypeConstructor::apply`], which
/// returns the canonical object for each `(constructor, arguments)` pair.
/// Equality and hashing are therefore by identity.
#[derive(Clone)]
pub struct TypeDescriptor(Arc<DescriptorData>);

struct DescriptorData {
    constructor: TypeConstructor,
    args: SmallVec<[TypeArg; 4]>,
}

impl TypeDescriptor {
    pub(crate) fn new(constructor: TypeConstructor, args: SmallVec<[TypeArg; 4]>) -> Self {
        TypeDescriptor(Arc::new(DescriptorData { constructor, args }))
    }

    pub fn constructor(&self) -> &TypeConstructor {
        &self.0.constructor
    }

    pub fn name(&self) -> Symbol {
        self.0.constructor.name()
    }

    pub fn base(&self) -> Kind {
        self.0.constructor.base()
    }

    pub fn args(&self) -> &[TypeArg] {
        &self.0.args
    }

    pub fn arg(&self, index: usize) -> Option<&TypeArg> {
        self.0.args.get(index)
    }

    /// True iff `value` has the base kind and the constructor's checker accepts it.
    pub fn check(&self, value: &Value) -> bool {
        self.base().accepts(value)
            && self
                .0
                .constructor
                .checker()
                .is_none_or(|checker| checker(self, value))
    }

    pub fn ptr_eq(&self, other: &TypeDescriptor) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.name())?;
        for (i, arg) in self.args().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl TypeCheck for TypeDescriptor {
    fn check(&self, value: &Value) -> bool {
        TypeDescriptor::check(self, value)
    }
}

impl From<TypeDescriptor> for Annotation {
    fn from(descriptor: TypeDescriptor) -> Self {
        Annotation::Check(Arc::new(descriptor))
    }
}

impl From<&TypeDescriptor> for Annotation {
    fn from(descriptor: &TypeDescriptor) -> Self {
        Annotation::Check(Arc::new(descriptor.clone()))
    }
}
