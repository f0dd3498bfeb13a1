use adtkit::{
    AdtErrorKind, AdtResult, ProductType, SingletonType, UnionType, Value, is_member,
};
use insta::assert_snapshot;

struct ListAdt {
    union: UnionType,
    cons: ProductType,
    empty: SingletonType,
}

fn list_adt() -> ListAdt {
    let cons = ProductType::builder("Cons")
        .fields(["hd", "tl"])
        .method("len", |this, _| {
            Ok(Value::from(1 + this.get("tl")?.call("len", &[])?.try_int()?))
        })
        .build()
        .unwrap();
    let empty = SingletonType::builder("Empty")
        .method("len", |_, _| Ok(Value::from(0)))
        .build();
    let union = UnionType::builder("List")
        .variant(&cons)
        .variant(&empty)
        .build()
        .unwrap();
    ListAdt { union, cons, empty }
}

impl ListAdt {
    fn cons(&self, hd: impl Into<Value>, tl: impl Into<Value>) -> Value {
        self.cons.construct([hd.into(), tl.into()]).unwrap().into()
    }

    fn nil(&self) -> Value {
        self.empty.instance().into()
    }

    fn map(&self, f: &dyn Fn(&Value) -> AdtResult<Value>, list: &Value) -> AdtResult<Value> {
        self.union
            .dispatch(list)
            .case(&self.empty, |_| Ok(self.nil()))
            .case(&self.cons, |node| {
                let hd = f(node.get("hd")?)?;
                let tl = self.map(f, node.get("tl")?)?;
                Ok(self.cons(hd, tl))
            })
            .finish()
    }
}

#[test]
fn test_list_cons_empty() {
    let list = list_adt();
    assert!(list.empty.instance().ptr_eq(&list.empty.instance()));

    let e = list.nil();
    let l2 = list.cons(2, list.cons(3, e.clone()));
    assert_eq!(e.to_string(), "Empty()");
    assert_eq!(e.call("len", &[]).unwrap(), Value::from(0));
    assert_eq!(l2.call("len", &[]).unwrap(), Value::from(2));
    assert_snapshot!(l2.to_string(), @"Cons(2,Cons(3,Empty()))");
}

#[test]
fn test_membership_and_exclusion() {
    let list = list_adt();
    let l1 = list.cons(1, list.nil());

    assert!(is_member(&l1, &list.union));
    assert!(is_member(&l1, &list.cons));
    assert!(!is_member(&l1, &list.empty));
    assert!(is_member(&list.nil(), &list.union));
    assert!(!is_member(&list.nil(), &list.cons));

    // A second, structurally identical list ADT is unrelated.
    let other = list_adt();
    assert!(!is_member(&l1, &other.union));
    assert!(!is_member(&l1, &other.cons));
    assert_ne!(l1, other.cons(1, other.nil()));
}

#[test]
fn test_pattern_match_over_list() {
    let list = list_adt();
    let l2 = list.cons(2, list.cons(3, list.nil()));
    let inc = |x: &Value| -> AdtResult<Value> { Ok(Value::from(x.try_int()? + 1)) };

    let mapped = list.map(&inc, &l2).unwrap();
    assert_eq!(mapped, list.cons(3, list.cons(4, list.nil())));

    let err = list.map(&inc, &Value::from("not a list")).unwrap_err();
    assert!(matches!(err.kind(), AdtErrorKind::NoMatchingVariant { .. }));
    assert_snapshot!(err.to_string(), @"no case matched 'not a list' in union List");
}
