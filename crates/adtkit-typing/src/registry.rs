//! Process-wide memoization of parameterized descriptors.

use std::sync::LazyLock;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constructor::TypeConstructor;
use crate::descriptor::{TypeArg, TypeDescriptor};

type RegistryKey = (u64, SmallVec<[TypeArg; 4]>);

static REGISTRY: LazyLock<DashMap<RegistryKey, TypeDescriptor>> = LazyLock::new(DashMap::new);

/// Read-only view of the descriptor registry.
#[derive(Clone, Copy, Debug)]
pub struct Registry {
    _private: (),
}

pub fn registry() -> Registry {
    Registry { _private: () }
}

impl Registry {
    /// Number of canonical descriptors created so far.
    pub fn len(&self) -> usize {
        REGISTRY.len()
    }

    pub fn is_empty(&self) -> bool {
        REGISTRY.is_empty()
    }

    /// Whether `constructor` has already been indexed with `args`.
    pub fn contains(&self, constructor: &TypeConstructor, args: &[TypeArg]) -> bool {
        REGISTRY.contains_key(&(constructor.id(), SmallVec::from(args)))
    }
}

/// Return the canonical descriptor for `(constructor, args)`, creating it if absent.
///
/// Concurrent first requests for the same key all receive the one descriptor
/// that won the insertion.
pub(crate) fn intern(
    constructor: &TypeConstructor,
    args: SmallVec<[TypeArg; 4]>,
) -> TypeDescriptor {
    let key = (constructor.id(), args);
    if let Some(existing) = REGISTRY.get(&key) {
        trace!(descriptor = %existing.value(), "descriptor cache hit");
        return existing.value().clone();
    }
    match REGISTRY.entry(key) {
        Entry::Occupied(entry) => entry.get().clone(),
        Entry::Vacant(entry) => {
            let descriptor = TypeDescriptor::new(constructor.clone(), entry.key().1.clone());
            debug!(descriptor = %descriptor, "interned descriptor");
            entry.insert(descriptor.clone());
            descriptor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructor::{Arity, type_constructor};
    use adtkit_runtime::Kind;

    #[test]
    fn equal_arguments_share_one_descriptor() {
        let list = type_constructor("List", Kind::List, Arity::Fixed(1));
        let a = list.of(Kind::Int).unwrap();
        let b = list.of(Kind::Int).unwrap();
        assert!(a.ptr_eq(&b));
        assert!(registry().contains(&list, &[TypeArg::Kind(Kind::Int)]));

        let c = list.of(Kind::Str).unwrap();
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn constructors_with_the_same_name_stay_apart() {
        let a = type_constructor("Box", Kind::Any, Arity::Fixed(1));
        let b = type_constructor("Box", Kind::Any, Arity::Fixed(1));
        let da = a.of(Kind::Int).unwrap();
        let db = b.of(Kind::Int).unwrap();
        assert_ne!(da, db);
        assert_eq!(da.to_string(), db.to_string());
    }

    #[test]
    fn nested_descriptors_are_canonical() {
        let list = type_constructor("List", Kind::List, Arity::Fixed(1));
        let inner = list.of(Kind::Str).unwrap();
        let outer_a = list.of(&inner).unwrap();
        let outer_b = list.of(list.of(Kind::Str).unwrap()).unwrap();
        assert!(outer_a.ptr_eq(&outer_b));
        assert!(!registry().is_empty());
    }
}
