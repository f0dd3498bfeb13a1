//! Error types for type synthesis, construction, binding and dispatch.

use derive_more::{Display, Error};

use crate::symbol::Symbol;

pub type AdtResult<T> = Result<T, AdtError>;

#[derive(Display, Debug, Error)]
#[display("{kind}")]
pub struct AdtError {
    kind: Box<AdtErrorKind>,
}

impl From<AdtErrorKind> for AdtError {
    fn from(kind: AdtErrorKind) -> Self {
        AdtError {
            kind: Box::new(kind),
        }
    }
}

impl AdtError {
    pub fn kind(&self) -> &AdtErrorKind {
        &self.kind
    }

    /// True for every failure caused by a wrong number of arguments,
    /// including a required field left unset.
    pub fn is_arity(&self) -> bool {
        matches!(
            *self.kind,
            AdtErrorKind::Arity { .. }
                | AdtErrorKind::MissingField { .. }
                | AdtErrorKind::MethodArity { .. }
        )
    }

    pub(crate) fn arity(type_name: Symbol, expected: usize, got: usize) -> Self {
        AdtErrorKind::Arity {
            type_name,
            expected,
            got,
        }
        .into()
    }

    pub(crate) fn missing_field(type_name: Symbol, field: Symbol) -> Self {
        AdtErrorKind::MissingField { type_name, field }.into()
    }

    pub(crate) fn unknown_field(type_name: Symbol, field: impl std::fmt::Display) -> Self {
        AdtErrorKind::UnknownField {
            type_name,
            field: field.to_string(),
        }
        .into()
    }

    pub(crate) fn duplicate_argument(type_name: Symbol, field: Symbol) -> Self {
        AdtErrorKind::DuplicateArgument { type_name, field }.into()
    }

    pub(crate) fn duplicate_field(type_name: Symbol, field: Symbol) -> Self {
        AdtErrorKind::DuplicateField { type_name, field }.into()
    }

    pub(crate) fn invalid_variant(
        union: Symbol,
        member: Symbol,
        reason: impl Into<String>,
    ) -> Self {
        AdtErrorKind::InvalidVariant {
            union,
            member,
            reason: reason.into(),
        }
        .into()
    }

    pub fn unknown_method(
        receiver: impl std::fmt::Display,
        method: impl std::fmt::Display,
    ) -> Self {
        AdtErrorKind::UnknownMethod {
            receiver: receiver.to_string(),
            method: method.to_string(),
        }
        .into()
    }

    /// Raised by method bodies that receive a value of the wrong shape.
    pub fn type_mismatch(expected: &'static str, found: impl std::fmt::Display) -> Self {
        AdtErrorKind::TypeMismatch {
            expected,
            found: found.to_string(),
        }
        .into()
    }
}

#[derive(Display, Debug, Error)]
pub enum AdtErrorKind {
    #[display("{type_name}() takes {expected} field argument(s) but {got} were given")]
    Arity {
        type_name: Symbol,
        expected: usize,
        got: usize,
    },

    #[display("{type_name}() missing required field `{field}`")]
    MissingField { type_name: Symbol, field: Symbol },

    #[display("{type_name} has no field `{field}`")]
    UnknownField { type_name: Symbol, field: String },

    #[display("{type_name}() got multiple values for field `{field}`")]
    DuplicateArgument { type_name: Symbol, field: Symbol },

    #[display("field `{field}` is declared more than once in {type_name}")]
    DuplicateField { type_name: Symbol, field: Symbol },

    #[display("field `{field}` of {type_name} expects {expected}, got {value}")]
    AnnotationMismatch {
        type_name: Symbol,
        field: Symbol,
        expected: String,
        value: String,
    },

    #[display("invalid variant `{member}` in union {union}: {reason}")]
    InvalidVariant {
        union: Symbol,
        member: Symbol,
        reason: String,
    },

    #[display("{variant} is already a member of union {existing}, cannot bind it to {requested}")]
    MultipleUnionBinding {
        variant: Symbol,
        existing: Symbol,
        requested: Symbol,
    },

    #[display("no case matched {value}{context}")]
    NoMatchingVariant { value: String, context: String },

    #[display("{receiver} has no method `{method}`")]
    UnknownMethod { receiver: String, method: String },

    #[display("method `{method}` expects {expected} argument(s), got {got}")]
    MethodArity {
        method: Symbol,
        expected: usize,
        got: usize,
    },

    #[display("expected {expected}, got {found}")]
    TypeMismatch { expected: &'static str, found: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn messages_name_the_offending_type() {
        let err = AdtError::arity(Symbol::new("Person"), 3, 4);
        assert!(err.is_arity());
        assert_snapshot!(err.to_string(), @"Person() takes 3 field argument(s) but 4 were given");

        let err = AdtError::unknown_field(Symbol::new("Person"), Symbol::new("height"));
        assert!(!err.is_arity());
        assert_snapshot!(err.to_string(), @"Person has no field `height`");
    }

    #[test]
    fn missing_field_counts_as_arity() {
        let err = AdtError::missing_field(Symbol::new("Cons"), Symbol::new("tl"));
        assert!(err.is_arity());
        assert!(matches!(err.kind(), AdtErrorKind::MissingField { .. }));
    }
}
