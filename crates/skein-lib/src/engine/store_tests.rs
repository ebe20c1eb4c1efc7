use serde_json::json;

use crate::Value;
use crate::denormalize::ResultProxy;

use super::*;

#[test]
fn rows_and_slots() {
    let mut store = Store::new();
    let child = store.push_row();
    store.set(RowId::ROOT, "user", Slot::Ref(child));
    store.set(child, "name", Slot::Value(Value::from("ann")));

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(RowId::ROOT, "user"), Some(&Slot::Ref(child)));
    assert_eq!(store.get(child, "missing"), None);
}

#[test]
fn proxy_follows_references() {
    let mut store = Store::new();
    let a = store.push_row();
    let b = store.push_row();
    store.set(RowId::ROOT, "users", Slot::Refs(vec![a, b]));
    store.set(RowId::ROOT, "admin", Slot::Null);
    store.set(a, "name", Slot::Value(Value::from("ann")));
    store.set(b, "name", Slot::Value(Value::from("bob")));

    let root = store.proxy();
    let names: Vec<Option<Value>> = root
        .list("users")
        .expect("users")
        .iter()
        .map(|user| user.value("name"))
        .collect();

    assert_eq!(names, [Some(Value::from("ann")), Some(Value::from("bob"))]);
    assert!(matches!(root.object("admin"), Some(None)));
    assert_eq!(root.value("admin"), Some(Value::Null));
    assert!(root.object("users").is_none());
}

#[test]
fn data_type_values_are_read_whole() {
    let mut store = Store::new();
    let origin = Value::from(json!({"x": 1, "y": {"z": 2}}));
    store.set(RowId::ROOT, "origin", Slot::Value(origin.clone()));

    let root = store.proxy();

    assert_eq!(root.value("origin"), Some(origin));
    assert!(root.object("origin").is_none());
    assert!(root.list("origin").is_none());
}

#[test]
fn rows_are_numbered_in_push_order() {
    let mut store = Store::new();

    let first = store.push_row();
    let second = store.push_row();

    assert_ne!(first, RowId::ROOT);
    assert_ne!(first, second);
    assert_eq!(store.len(), 3);
}
