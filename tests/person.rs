use adtkit::typing::LIST;
use adtkit::{Annotation, Kind, ProductType, Value};
use insta::assert_snapshot;

fn person() -> ProductType {
    ProductType::builder("Person")
        .field(("name", Kind::Str))
        .field(("age", Kind::Int))
        .field(("cities", LIST.of(Kind::Str).unwrap()))
        .method("walk", |_, _| Ok(Value::from("Walk")))
        .build()
        .unwrap()
}

fn bob(person: &ProductType) -> Value {
    person
        .construct([Value::from("bob"), Value::from(22), Value::list(["austin", "dallas"])])
        .unwrap()
        .into()
}

#[test]
fn test_equality_update_repr() {
    let person = person();
    let p = bob(&person);
    let p = p.as_instance().unwrap();

    assert_eq!(Value::from(p), bob(&person));

    let older = p
        .with_([("age", p.get("age").unwrap().try_int().unwrap() + 1)])
        .unwrap();
    let expected = person
        .construct_named([
            ("name", Value::from("bob")),
            ("age", Value::from(23)),
            ("cities", Value::list(["austin", "dallas"])),
        ])
        .unwrap();
    assert_eq!(older, expected);
    assert_eq!(p.get("age").unwrap(), &Value::from(22));

    assert_snapshot!(p.to_string(), @"Person(bob,22,['austin', 'dallas'])");
    assert_eq!(p.call("walk", &[]).unwrap(), Value::from("Walk"));
}

#[test]
fn test_nested_struct() {
    let person = person();
    let club = ProductType::builder("Club")
        .field(("name", Kind::Str))
        .field(("members", LIST.of(&person).unwrap()))
        .build()
        .unwrap();

    let p = bob(&person);
    let chris = p.as_instance().unwrap().with_([("name", "Chris")]).unwrap();
    let s = club
        .construct([Value::from("Soccer"), Value::list([p.clone(), chris.into()])])
        .unwrap();

    assert_snapshot!(
        s.to_string(),
        @"Club(Soccer,[Person(bob,22,['austin', 'dallas']), Person(Chris,22,['austin', 'dallas'])])"
    );
    assert!(club.validate(&s).is_ok());
}

#[test]
fn test_field_annotations_are_data() {
    let person = person();
    let rendered: Vec<String> = person
        .fields()
        .annotations()
        .map(|(name, annotation)| match annotation {
            Some(annotation) => format!("{name}: {annotation}"),
            None => name.to_string(),
        })
        .collect();
    assert_eq!(rendered, ["name: str", "age: int", "cities: List[str]"]);

    // Annotations are not enforced unless asked for.
    let odd = person
        .construct([Value::from(1), Value::from("x"), Value::None])
        .unwrap();
    let err = person.validate(&odd).unwrap_err();
    assert_snapshot!(err.to_string(), @"field `name` of Person expects str, got 1");
}

#[test]
fn test_self_reference_by_name() {
    let node = ProductType::builder("Node")
        .field("value")
        .field(("next", Annotation::forward("Node")))
        .enforce_annotations(true)
        .build()
        .unwrap();
    let tail = node.construct([Value::from(2), Value::None]).unwrap();
    let head = node.construct([Value::from(1), tail.into()]).unwrap();
    assert_snapshot!(head.to_string(), @"Node(1,Node(2,None))");
}
