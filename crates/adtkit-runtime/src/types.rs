//! Type identities and the handles that refer to synthesized types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::method::MethodTable;
use crate::product::ProductType;
use crate::singleton::SingletonType;
use crate::symbol::Symbol;
use crate::union::{UnionType, union_of};

static NEXT_TYPE_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a synthesized type.
///
/// Two types built from identical field specs still get distinct keys, which
/// is what keeps `A(1) != B(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(u64);

impl TypeKey {
    pub(crate) fn fresh() -> Self {
        TypeKey(NEXT_TYPE_KEY.fetch_add(1, Ordering::Relaxed))
    }

    pub fn index(self) -> u64 {
        self.0
    }
}

/// A type that can be a member of a union.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum VariantType {
    Product(ProductType),
    Singleton(SingletonType),
}

impl VariantType {
    pub fn key(&self) -> TypeKey {
        match self {
            VariantType::Product(ty) => ty.key(),
            VariantType::Singleton(ty) => ty.key(),
        }
    }

    pub fn name(&self) -> Symbol {
        match self {
            VariantType::Product(ty) => ty.name(),
            VariantType::Singleton(ty) => ty.name(),
        }
    }

    pub fn methods(&self) -> &MethodTable {
        match self {
            VariantType::Product(ty) => ty.methods(),
            VariantType::Singleton(ty) => ty.methods(),
        }
    }

    pub fn as_product(&self) -> Option<&ProductType> {
        match self {
            VariantType::Product(ty) => Some(ty),
            VariantType::Singleton(_) => None,
        }
    }

    pub fn as_singleton(&self) -> Option<&SingletonType> {
        match self {
            VariantType::Singleton(ty) => Some(ty),
            VariantType::Product(_) => None,
        }
    }

    /// The union this variant is bound to, if any.
    pub fn union(&self) -> Option<UnionType> {
        union_of(self.key())
    }
}

impl fmt::Debug for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantType::Product(ty) => fmt::Debug::fmt(ty, f),
            VariantType::Singleton(ty) => fmt::Debug::fmt(ty, f),
        }
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<ProductType> for VariantType {
    fn from(ty: ProductType) -> Self {
        VariantType::Product(ty)
    }
}

impl From<SingletonType> for VariantType {
    fn from(ty: SingletonType) -> Self {
        VariantType::Singleton(ty)
    }
}

impl From<&ProductType> for VariantType {
    fn from(ty: &ProductType) -> Self {
        VariantType::Product(ty.clone())
    }
}

impl From<&SingletonType> for VariantType {
    fn from(ty: &SingletonType) -> Self {
        VariantType::Singleton(ty.clone())
    }
}

/// Any synthesized type: the target of a membership query or a field annotation.
#[derive(Clone)]
pub enum AdtType {
    Product(ProductType),
    Singleton(SingletonType),
    Union(UnionType),
}

impl AdtType {
    pub fn key(&self) -> TypeKey {
        match self {
            AdtType::Product(ty) => ty.key(),
            AdtType::Singleton(ty) => ty.key(),
            AdtType::Union(ty) => ty.key(),
        }
    }

    pub fn name(&self) -> Symbol {
        match self {
            AdtType::Product(ty) => ty.name(),
            AdtType::Singleton(ty) => ty.name(),
            AdtType::Union(ty) => ty.name(),
        }
    }
}

impl PartialEq for AdtType {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for AdtType {}

impl Hash for AdtType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for AdtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdtType::Product(ty) => fmt::Debug::fmt(ty, f),
            AdtType::Singleton(ty) => fmt::Debug::fmt(ty, f),
            AdtType::Union(ty) => fmt::Debug::fmt(ty, f),
        }
    }
}

impl fmt::Display for AdtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&AdtType> for AdtType {
    fn from(ty: &AdtType) -> Self {
        ty.clone()
    }
}

impl From<VariantType> for AdtType {
    fn from(ty: VariantType) -> Self {
        match ty {
            VariantType::Product(ty) => AdtType::Product(ty),
            VariantType::Singleton(ty) => AdtType::Singleton(ty),
        }
    }
}

impl From<&VariantType> for AdtType {
    fn from(ty: &VariantType) -> Self {
        ty.clone().into()
    }
}

macro_rules! adt_type_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for AdtType {
                fn from(ty: $ty) -> Self {
                    AdtType::$variant(ty)
                }
            }

            impl From<&$ty> for AdtType {
                fn from(ty: &$ty) -> Self {
                    AdtType::$variant(ty.clone())
                }
            }
        )*
    };
}

adt_type_from! {
    ProductType => Product,
    SingletonType => Singleton,
    UnionType => Union,
}
