//! The standard constructor prelude.
//!
//! None of these carry a checker: a descriptor built from them accepts any
//! value of the constructor's base kind.

use std::sync::LazyLock;

use adtkit_runtime::Kind;

use crate::constructor::{Arity, TypeConstructor, type_constructor};

pub static LIST: LazyLock<TypeConstructor> =
    LazyLock::new(|| type_constructor("List", Kind::List, Arity::Fixed(1)));
pub static ITERABLE: LazyLock<TypeConstructor> =
    LazyLock::new(|| type_constructor("Iterable", Kind::Any, Arity::Fixed(1)));
pub static SET: LazyLock<TypeConstructor> =
    LazyLock::new(|| type_constructor("Set", Kind::Set, Arity::Fixed(1)));
pub static TUPLE: LazyLock<TypeConstructor> =
    LazyLock::new(|| type_constructor("Tuple", Kind::Tuple, Arity::Variadic));
pub static MAYBE: LazyLock<TypeConstructor> =
    LazyLock::new(|| type_constructor("Maybe", Kind::Any, Arity::Fixed(1)));
pub static DICT: LazyLock<TypeConstructor> =
    LazyLock::new(|| type_constructor("Dict", Kind::Dict, Arity::Fixed(2)));
pub static UNION: LazyLock<TypeConstructor> =
    LazyLock::new(|| type_constructor("Union", Kind::Any, Arity::Variadic));
pub static FUNCTION: LazyLock<TypeConstructor> =
    LazyLock::new(|| type_constructor("Function", Kind::Any, Arity::Variadic));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeArg;
    use adtkit_runtime::Value;
    use insta::assert_snapshot;

    #[test]
    fn prelude_renders_like_its_shape() {
        assert_snapshot!(LIST.to_string(), @"List[_]");
        assert_snapshot!(DICT.to_string(), @"Dict[_, _]");
        assert_snapshot!(TUPLE.to_string(), @"Tuple[*]");
    }

    #[test]
    fn nested_descriptor_display() {
        let inner = DICT.apply([Kind::Int, Kind::Str]).unwrap();
        let d = DICT
            .apply([TypeArg::from(Kind::Str), LIST.of(inner).unwrap().into()])
            .unwrap();
        assert_snapshot!(d.to_string(), @"Dict[str, List[Dict[int, str]]]");
    }

    #[test]
    fn check_uses_the_base_kind() {
        let l = LIST.of(Kind::Int).unwrap();
        assert!(l.check(&Value::list([1, 2])));
        assert!(!l.check(&Value::from(2)));

        let maybe = MAYBE.of(Kind::Int).unwrap();
        assert!(maybe.check(&Value::None));
        assert!(DICT.apply([Kind::Int]).is_err());
    }
}
