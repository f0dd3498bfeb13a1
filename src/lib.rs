//! Algebraic data types assembled at runtime.
//!
//! Build product types from field lists, singleton variants with one
//! process-wide instance, and tagged unions that bind them together:
//!
//! ```
//! use adtkit::{UnionType, Value, build_product_type, build_singleton_type};
//!
//! let empty = build_singleton_type("Empty");
//! let cons = build_product_type("Cons", ["hd", "tl"]).unwrap();
//! let list = UnionType::builder("List")
//!     .member("Empty", &empty)
//!     .member("Cons", &cons)
//!     .build()
//!     .unwrap();
//!
//! let xs = cons.construct([Value::from(1), empty.instance().into()]).unwrap();
//! assert_eq!(xs.to_string(), "Cons(1,Empty)");
//! assert!(list.contains(&xs.into()));
//! ```
//!
//! Parameterized descriptors live in [`typing`].

pub use adtkit_runtime::*;
pub use adtkit_typing as typing;
