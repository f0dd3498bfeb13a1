//! Zero-field variant types with exactly one instance per process.
//!
//! The instance cache is process-wide and append-only: the first call to
//! [`SingletonType::instance`] for a type creates its instance, every later
//! call (from any thread) returns that same reference.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock, OnceLock};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::error::AdtResult;
use crate::instance::Instance;
use crate::method::{Method, MethodTable};
use crate::symbol::Symbol;
use crate::types::{TypeKey, VariantType};
use crate::value::Value;

static INSTANCES: LazyLock<DashMap<TypeKey, Instance>> = LazyLock::new(DashMap::new);

/// Synthesize a singleton type named `name` with no methods.
pub fn build_singleton_type(name: impl Into<Symbol>) -> SingletonType {
    SingletonType::builder(name).build()
}

#[derive(Clone)]
pub struct SingletonType(Arc<SingletonTypeData>);

struct SingletonTypeData {
    key: TypeKey,
    name: Symbol,
    methods: MethodTable,
    /// Union-scoped display name, set at most once when bound under a member name.
    display: OnceLock<Symbol>,
}

impl SingletonType {
    pub fn builder(name: impl Into<Symbol>) -> SingletonTypeBuilder {
        SingletonTypeBuilder {
            name: name.into(),
            methods: MethodTable::new(),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.0.key
    }

    pub fn name(&self) -> Symbol {
        self.0.name
    }

    pub fn methods(&self) -> &MethodTable {
        &self.0.methods
    }

    /// The unique instance of this type, created on first use.
    pub fn instance(&self) -> Instance {
        if let Some(existing) = INSTANCES.get(&self.key()) {
            trace!(name = %self.name(), "singleton cache hit");
            return existing.value().clone();
        }
        INSTANCES
            .entry(self.key())
            .or_insert_with(|| {
                debug!(name = %self.name(), "instantiated singleton");
                Instance::new(VariantType::Singleton(self.clone()), Box::new([]))
            })
            .value()
            .clone()
    }

    pub fn display_override(&self) -> Option<Symbol> {
        self.0.display.get().copied()
    }

    /// Returns `false` if an override was already set.
    pub(crate) fn set_display_override(&self, name: Symbol) -> bool {
        self.0.display.set(name).is_ok()
    }
}

impl PartialEq for SingletonType {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for SingletonType {}

impl Hash for SingletonType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for SingletonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for SingletonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}()", self.name())
    }
}

pub struct SingletonTypeBuilder {
    name: Symbol,
    methods: MethodTable,
}

impl SingletonTypeBuilder {
    pub fn method(
        mut self,
        name: impl Into<Symbol>,
        f: impl Fn(&Instance, &[Value]) -> AdtResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Method::new(f));
        self
    }

    pub fn build(self) -> SingletonType {
        let ty = SingletonType(Arc::new(SingletonTypeData {
            key: TypeKey::fresh(),
            name: self.name,
            methods: self.methods,
            display: OnceLock::new(),
        }));
        debug!(name = %ty.name(), "synthesized singleton type");
        ty
    }
}
