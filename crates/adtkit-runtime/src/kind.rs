//! Base representation kinds of runtime values.

use derive_more::Display;

use crate::value::Value;

/// The representation a value is stored as, independent of any ADT type.
///
/// `Any` is the top kind and accepts every value.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    #[display("object")]
    Any,
    #[display("None")]
    None,
    #[display("bool")]
    Bool,
    #[display("int")]
    Int,
    #[display("float")]
    Float,
    #[display("str")]
    Str,
    #[display("list")]
    List,
    #[display("tuple")]
    Tuple,
    #[display("dict")]
    Dict,
    #[display("set")]
    Set,
    #[display("instance")]
    Instance,
}

impl Kind {
    /// The most specific kind of `value`.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::None => Kind::None,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Tuple(_) => Kind::Tuple,
            Value::Dict(_) => Kind::Dict,
            Value::Set(_) => Kind::Set,
            Value::Instance(_) => Kind::Instance,
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        self == Kind::Any || self == Kind::of(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_accepts_everything() {
        for value in [Value::None, Value::from(3), Value::from("x"), Value::list([1, 2])] {
            assert!(Kind::Any.accepts(&value));
        }
    }

    #[test]
    fn concrete_kinds_are_exact() {
        assert!(Kind::Int.accepts(&Value::from(2)));
        assert!(!Kind::Int.accepts(&Value::from("abc")));
        assert!(!Kind::Int.accepts(&Value::from(2.0)));
        assert_eq!(Kind::of(&Value::list(Vec::<Value>::new())), Kind::List);
        assert_eq!(Kind::Str.to_string(), "str");
    }
}
