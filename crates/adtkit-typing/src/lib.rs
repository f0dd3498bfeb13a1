//! Parameterized type descriptors: `List[int]`, `Dict[str, List[int]]`,
//! `IntRange[2, 5]`.
//!
//! A [`TypeConstructor`] indexed with arguments yields a [`TypeDescriptor`].
//! Descriptors are memoized process-wide, so indexing the same constructor
//! with equal arguments twice returns the very same descriptor. Descriptors
//! describe and check values; they never construct them.

pub mod builtin;
pub mod constructor;
pub mod descriptor;
pub mod error;
pub mod registry;

pub use builtin::{DICT, FUNCTION, ITERABLE, LIST, MAYBE, SET, TUPLE, UNION};
pub use constructor::{Arity, Checker, TypeConstructor, TypeConstructorBuilder, type_constructor};
pub use descriptor::{TypeArg, TypeDescriptor};
pub use error::{TypingError, TypingErrorKind, TypingResult};
pub use registry::{Registry, registry};
