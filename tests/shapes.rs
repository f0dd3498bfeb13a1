use std::f64::consts::PI;

use adtkit::{Kind, MethodTable, ProductType, Value, bind_union, is_member};
use insta::assert_snapshot;

fn int(this: &adtkit::Instance, field: &str) -> adtkit::AdtResult<i64> {
    this.get(field)?.try_int()
}

#[test]
fn test_union_with_methods() {
    let rect = ProductType::builder("Rect")
        .field(("x", Kind::Int))
        .field(("y", Kind::Int))
        .method("area", |this, _| Ok(Value::from(int(this, "x")? * int(this, "y")?)))
        .method("peri", |this, _| {
            Ok(Value::from(2 * (int(this, "x")? + int(this, "y")?)))
        })
        .build()
        .unwrap();
    let circle = ProductType::builder("Circle")
        .field(("r", Kind::Int))
        .method("area", |this, _| {
            let r = int(this, "r")? as f64;
            Ok(Value::from(PI * r * r))
        })
        .build()
        .unwrap();
    let shape = bind_union(
        "Shape",
        MethodTable::new().with("shared", |_, _| Ok(Value::from("I am a Shape"))),
        [("Rect", &rect), ("Circle", &circle)],
    )
    .unwrap();

    let r = Value::from(rect.construct([10, 20]).unwrap());
    let c = Value::from(circle.construct([20]).unwrap());

    assert!(is_member(&r, &shape));
    assert!(is_member(&r, &rect));
    assert!(!is_member(&r, &circle));
    assert!(is_member(&c, &shape));

    assert_eq!(r.call("shared", &[]).unwrap(), Value::from("I am a Shape"));
    assert_eq!(r.call("area", &[]).unwrap(), Value::from(200));
    assert_eq!(r.call("peri", &[]).unwrap(), Value::from(60));
    let area = c.call("area", &[]).unwrap().try_float().unwrap();
    assert!((area - 400.0 * PI).abs() < 1e-9);

    let err = c.call("peri", &[]).unwrap_err();
    assert_snapshot!(err.to_string(), @"Circle has no method `peri`");

    assert_eq!(rect.construct([4, 5]).unwrap().to_string(), "Rect(4,5)");
    assert_eq!(rect.fields().to_string(), "x: int, y: int");
}

#[test]
fn test_plain_union_of_structs() {
    let key = ProductType::builder("Key").fields(["key", "modifiers"]).build().unwrap();
    let mouse = ProductType::builder("Mouse").field("position").build().unwrap();
    let event =
        bind_union("Event", MethodTable::new(), [("Key", &key), ("Mouse", &mouse)]).unwrap();

    let k = Value::from(key.construct([Value::from("a"), Value::list(["shift"])]).unwrap());
    assert!(event.contains(&k));
    assert_eq!(k.as_instance().unwrap().union(), Some(event.clone()));
    assert_snapshot!(format!("{event:?}"), @"Event = Key | Mouse");
    assert_snapshot!(k.to_string(), @"Key(a,['shift'])");
}
