//! Runtime engine for algebraic data types.
//!
//! Product types, singleton variants and tagged unions are synthesized at
//! runtime from field lists and member declarations. Instances are immutable,
//! compare structurally within one exact type, and print as `Name(v1,v2)`.
//! Union membership is a relation table recorded once per variant.

// === Values and names ===
pub mod kind;
pub mod symbol;
pub mod value;

// === Type synthesis ===
pub mod field;
pub mod product;
pub mod singleton;
pub mod types;
pub mod union;

// === Instances and behavior ===
pub mod dispatch;
pub mod instance;
pub mod method;

pub mod error;

pub use dispatch::Match;
pub use error::{AdtError, AdtErrorKind, AdtResult};
pub use field::{Annotation, Field, FieldSpec, TypeCheck};
pub use instance::Instance;
pub use kind::Kind;
pub use method::{Method, MethodFn, MethodTable, exact_args};
pub use product::{ProductType, ProductTypeBuilder, build_product_type};
pub use singleton::{SingletonType, SingletonTypeBuilder, build_singleton_type};
pub use symbol::Symbol;
pub use types::{AdtType, TypeKey, VariantType};
pub use union::{MemberSpec, UnionBuilder, UnionType, bind_union, is_member, union_of};
pub use value::{Repr, Value};
