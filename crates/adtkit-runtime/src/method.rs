//! Method tables attached to product, singleton and union types.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{AdtErrorKind, AdtResult};
use crate::instance::Instance;
use crate::symbol::Symbol;
use crate::value::Value;

/// Signature of every runtime method: the receiver, then positional arguments.
pub type MethodFn = dyn Fn(&Instance, &[Value]) -> AdtResult<Value> + Send + Sync;

#[derive(Clone)]
pub struct Method(Arc<MethodFn>);

impl Method {
    pub fn new(
        f: impl Fn(&Instance, &[Value]) -> AdtResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Method(Arc::new(f))
    }

    pub fn invoke(&self, receiver: &Instance, args: &[Value]) -> AdtResult<Value> {
        (self.0)(receiver, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<method>")
    }
}

/// Name-to-method map; later definitions replace earlier ones of the same name.
#[derive(Clone, Default)]
pub struct MethodTable {
    entries: SmallVec<[(Symbol, Method); 4]>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable form of [`MethodTable::insert`].
    pub fn with(
        mut self,
        name: impl Into<Symbol>,
        f: impl Fn(&Instance, &[Value]) -> AdtResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.insert(name.into(), Method::new(f));
        self
    }

    pub fn insert(&mut self, name: Symbol, method: Method) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = method,
            None => self.entries.push((name, method)),
        }
    }

    pub fn get(&self, name: Symbol) -> Option<&Method> {
        self.entries
            .iter()
            .find_map(|(n, method)| (*n == name).then_some(method))
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Destructure a method's arguments, failing with an arity error on a count mismatch.
///
/// ```
/// use adtkit_runtime::{Value, exact_args};
///
/// let args = [Value::from(1), Value::from(2)];
/// let [a, b] = exact_args::<2>("add", &args).unwrap();
/// assert_eq!((a, b), (&Value::from(1), &Value::from(2)));
/// ```
pub fn exact_args<'a, const N: usize>(
    method: &str,
    args: &'a [Value],
) -> AdtResult<&'a [Value; N]> {
    args.try_into().map_err(|_| {
        AdtErrorKind::MethodArity {
            method: Symbol::from_dynamic(method),
            expected: N,
            got: args.len(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_replaces() {
        let mut table = MethodTable::new();
        table.insert(Symbol::new("len"), Method::new(|_, _| Ok(Value::from(0))));
        table.insert(Symbol::new("len"), Method::new(|_, _| Ok(Value::from(1))));
        assert_eq!(table.len(), 1);
        assert!(table.contains(Symbol::new("len")));
        assert!(!table.contains(Symbol::new("map")));
    }

    #[test]
    fn exact_args_reports_arity() {
        let args = [Value::from(1)];
        let err = exact_args::<2>("add", &args).unwrap_err();
        assert!(err.is_arity());
        assert_eq!(err.to_string(), "method `add` expects 2 argument(s), got 1");
    }
}
