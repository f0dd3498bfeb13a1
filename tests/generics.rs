use adtkit::Kind;
use adtkit::Value;
use adtkit::typing::{
    Arity, DICT, FUNCTION, ITERABLE, LIST, MAYBE, SET, TUPLE, TypeArg, TypeConstructor, UNION,
    registry, type_constructor,
};
use insta::assert_snapshot;

fn int_range() -> TypeConstructor {
    TypeConstructor::builder("IntRange")
        .base(Kind::Int)
        .arity(Arity::Fixed(2))
        .checker(|t, x| {
            let bounds = (t.args()[0].as_literal(), t.args()[1].as_literal());
            match (bounds, x.as_int()) {
                ((Some(lo), Some(hi)), Some(x)) => {
                    lo.as_int().is_some_and(|lo| lo <= x) && hi.as_int().is_some_and(|hi| x <= hi)
                }
                _ => false,
            }
        })
        .build()
}

#[test]
fn test_prelude_constructors() {
    let _ = (
        LIST.of(Kind::Int).unwrap(),
        ITERABLE.of(Kind::Int).unwrap(),
        SET.of(Kind::Int).unwrap(),
        TUPLE.apply([Kind::Int, Kind::Str, Kind::Int]).unwrap(),
        MAYBE.of(Kind::Int).unwrap(),
        DICT.apply([Kind::Int, Kind::Int]).unwrap(),
    );
    let u = UNION.apply([Kind::Int, Kind::Str, Kind::Float]).unwrap();
    let f = FUNCTION.apply([Kind::Int, Kind::Str, Kind::Float]).unwrap();
    assert_snapshot!(u.to_string(), @"Union[int, str, float]");
    assert_snapshot!(f.to_string(), @"Function[int, str, float]");
    assert!(registry().len() >= 8);
}

#[test]
fn test_descriptor_shapes_and_strings() {
    let list = type_constructor("List", Kind::List, Arity::Fixed(1));
    let dict = type_constructor("Dict", Kind::Dict, Arity::Fixed(2));
    let func = type_constructor("Func", Kind::Any, Arity::Variadic);

    let l1 = list.of(Kind::Int).unwrap();
    let l2 = list.of(list.of(Kind::Str).unwrap()).unwrap();
    let d1 = dict
        .apply([
            TypeArg::from(Kind::Str),
            list.of(dict.apply([Kind::Int, Kind::Str]).unwrap()).unwrap().into(),
        ])
        .unwrap();
    let f = func
        .apply([TypeArg::from(Kind::Int), l1.clone().into(), Kind::Int.into()])
        .unwrap();

    assert!(matches!(l1.args(), [TypeArg::Kind(Kind::Int)]));
    assert!(matches!(
        l2.arg(0),
        Some(TypeArg::Descriptor(inner)) if inner.args() == [TypeArg::Kind(Kind::Str)]
    ));
    assert!(matches!(d1.args(), [TypeArg::Kind(_), TypeArg::Descriptor(_)]));

    assert_snapshot!(list.to_string(), @"List[_]");
    assert_snapshot!(l1.to_string(), @"List[int]");
    assert_snapshot!(l2.to_string(), @"List[List[str]]");
    assert_snapshot!(dict.to_string(), @"Dict[_, _]");
    assert_snapshot!(d1.to_string(), @"Dict[str, List[Dict[int, str]]]");
    assert_snapshot!(func.to_string(), @"Func[*]");
    assert_snapshot!(f.to_string(), @"Func[int, List[int], int]");
}

#[test]
fn test_checks() {
    let list = type_constructor("List", Kind::List, Arity::Fixed(1));
    let l1 = list.of(Kind::Int).unwrap();
    assert!(l1.check(&Value::list([1, 2])));
    assert!(!l1.check(&Value::from(2)));

    let range = int_range();
    let i = range.apply([2, 5]).unwrap();
    assert_snapshot!(range.to_string(), @"IntRange[_, _]");
    assert_snapshot!(i.to_string(), @"IntRange[2, 5]");
    assert!(i.check(&Value::from(2)));
    assert!(!i.check(&Value::from(8)));
    assert!(!i.check(&Value::from("abc")));

    let en = TypeConstructor::builder("Enum")
        .arity(Arity::Variadic)
        .checker(|t, x| t.args().iter().any(|arg| arg.as_literal() == Some(x)))
        .build();
    let e = en.apply([1, 3, 5]).unwrap();
    assert_snapshot!(en.to_string(), @"Enum[*]");
    assert_snapshot!(e.to_string(), @"Enum[1, 3, 5]");
    assert!(e.check(&Value::from(1)));
    assert!(!e.check(&Value::from(2)));
}

#[test]
fn test_memoized_identity() {
    let a = DICT.apply([Kind::Str, Kind::Int]).unwrap();
    let b = DICT.apply([Kind::Str, Kind::Int]).unwrap();
    assert!(a.ptr_eq(&b));
    assert!(registry().contains(&DICT, &[Kind::Str.into(), Kind::Int.into()]));

    let err = DICT.of(Kind::Str).unwrap_err();
    assert_snapshot!(err.to_string(), @"Dict takes 2 type argument(s) but 1 were given");
}
