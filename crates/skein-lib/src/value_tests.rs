use serde_json::json;

use crate::introspection::Ident;
use crate::value::Value;

#[test]
fn object_keeps_insertion_order() {
    let value = Value::object([("b", 1), ("a", 2), ("c", 3)]);

    let keys: Vec<&str> = value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["b", "a", "c"]);
    assert_eq!(
        serde_json::to_string(&value).expect("serializable"),
        r#"{"b":1,"a":2,"c":3}"#
    );
}

#[test]
fn serializes_nested_values() {
    let value = Value::object([
        ("null", Value::Null),
        ("flag", Value::from(true)),
        ("ratio", Value::from(0.5)),
        ("tags", Value::from(vec!["x", "y"])),
        ("maybe", Value::from(None::<i64>)),
    ]);

    assert_eq!(
        serde_json::to_value(&value).expect("serializable"),
        json!({"null": null, "flag": true, "ratio": 0.5, "tags": ["x", "y"], "maybe": null})
    );
}

#[test]
fn ident_serializes_as_display_text() {
    let value = Value::from(Ident::non_null(Ident::list(Ident::input_object("Foo"))));

    assert_eq!(
        serde_json::to_value(&value).expect("serializable"),
        json!("NON_NULL(LIST(INPUT_OBJECT(IOFoo)))")
    );
}

#[test]
fn from_json() {
    let value = Value::from(json!({"a": [1, 2.5, "s", null, false]}));

    assert_eq!(
        value.get("a"),
        Some(&Value::List(vec![
            Value::Int(1),
            Value::Float(2.5),
            Value::from("s"),
            Value::Null,
            Value::Bool(false),
        ]))
    );
    assert_eq!(value.get("missing"), None);
    assert_eq!(Value::Int(1).get("a"), None);
}
