//! Type constructors: named generators of parameterized descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use adtkit_runtime::{Kind, Symbol, Value};
use derive_more::Display;
use smallvec::SmallVec;
use tracing::debug;

use crate::descriptor::{TypeArg, TypeDescriptor};
use crate::error::{TypingErrorKind, TypingResult};
use crate::registry;

static NEXT_CONSTRUCTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Extra acceptance test run after the base-kind check.
pub type Checker = dyn Fn(&TypeDescriptor, &Value) -> bool + Send + Sync;

/// Number of type arguments a constructor takes.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Arity {
    #[display("{_0}")]
    Fixed(usize),
    #[display("*")]
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

/// Shorthand for a constructor without a checker.
pub fn type_constructor(name: impl Into<Symbol>, base: Kind, arity: Arity) -> TypeConstructor {
    TypeConstructor::builder(name).base(base).arity(arity).build()
}

/// Handle to a type constructor such as `List` or `Dict`.
///
/// Constructors compare by identity: two constructors with the same name and
/// shape are still different constructors and produce different descriptors.
#[derive(Clone)]
pub struct TypeConstructor(Arc<ConstructorData>);

struct ConstructorData {
    id: u64,
    name: Symbol,
    base: Kind,
    arity: Arity,
    checker: Option<Arc<Checker>>,
}

impl TypeConstructor {
    pub fn builder(name: impl Into<Symbol>) -> TypeConstructorBuilder {
        TypeConstructorBuilder {
            name: name.into(),
            base: Kind::Any,
            arity: Arity::Fixed(1),
            checker: None,
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> Symbol {
        self.0.name
    }

    pub fn base(&self) -> Kind {
        self.0.base
    }

    pub fn arity(&self) -> Arity {
        self.0.arity
    }

    pub(crate) fn checker(&self) -> Option<&Checker> {
        self.0.checker.as_deref()
    }

    /// Index this constructor with `args`, returning the canonical descriptor.
    ///
    /// Equal argument lists always yield the same descriptor object. The
    /// argument count is validated before the registry is consulted.
    pub fn apply<A: Into<TypeArg>>(
        &self,
        args: impl IntoIterator<Item = A>,
    ) -> TypingResult<TypeDescriptor> {
        let args: SmallVec<[TypeArg; 4]> = args.into_iter().map(Into::into).collect();
        if !self.arity().accepts(args.len()) {
            return Err(TypingErrorKind::Arity {
                constructor: self.name(),
                expected: self.arity(),
                got: args.len(),
            }
            .into());
        }
        Ok(registry::intern(self, args))
    }

    /// Single-argument form of [`TypeConstructor::apply`].
    pub fn of(&self, arg: impl Into<TypeArg>) -> TypingResult<TypeDescriptor> {
        self.apply([arg.into()])
    }
}

impl PartialEq for TypeConstructor {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for TypeConstructor {}

impl Hash for TypeConstructor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

/// Renders the un-indexed form: `List[_]`, `Dict[_, _]`, `Tuple[*]`.
impl fmt::Display for TypeConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.name())?;
        match self.arity() {
            Arity::Variadic => f.write_str("*")?,
            Arity::Fixed(n) => {
                for i in 0..n {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("_")?;
                }
            }
        }
        f.write_str("]")
    }
}

impl fmt::Debug for TypeConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

pub struct TypeConstructorBuilder {
    name: Symbol,
    base: Kind,
    arity: Arity,
    checker: Option<Arc<Checker>>,
}

impl TypeConstructorBuilder {
    /// Kind every checked value must have. Defaults to `object`.
    pub fn base(mut self, base: Kind) -> Self {
        self.base = base;
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn checker(
        mut self,
        checker: impl Fn(&TypeDescriptor, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.checker = Some(Arc::new(checker));
        self
    }

    pub fn build(self) -> TypeConstructor {
        let constructor = TypeConstructor(Arc::new(ConstructorData {
            id: NEXT_CONSTRUCTOR_ID.fetch_add(1, Ordering::Relaxed),
            name: self.name,
            base: self.base,
            arity: self.arity,
            checker: self.checker,
        }));
        debug!(constructor = %constructor, "created type constructor");
        constructor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn unindexed_display() {
        let dict = type_constructor("Dict", Kind::Dict, Arity::Fixed(2));
        let en = type_constructor("Enum", Kind::Any, Arity::Variadic);
        assert_snapshot!(dict.to_string(), @"Dict[_, _]");
        assert_snapshot!(en.to_string(), @"Enum[*]");
    }

    #[test]
    fn arity_is_checked_before_interning() {
        let pair = type_constructor("Pair", Kind::Tuple, Arity::Fixed(2));
        let err = pair.of(Kind::Int).unwrap_err();
        assert!(err.is_arity());
        assert_snapshot!(err.to_string(), @"Pair takes 2 type argument(s) but 1 were given");
        assert!(!registry::registry().contains(&pair, &[TypeArg::Kind(Kind::Int)]));
    }

    #[test]
    fn variadic_accepts_any_count() {
        let func = type_constructor("Func", Kind::Any, Arity::Variadic);
        assert!(func.apply(Vec::<TypeArg>::new()).is_ok());
        assert!(func.apply([Kind::Int, Kind::Str, Kind::Int]).is_ok());
    }
}
