use crate::Value;

use super::query::*;

#[test]
fn result_key_prefers_alias() {
    let plain = field("name");
    let aliased = field("name").alias("title");

    assert_eq!(plain.result_key(), "name");
    assert_eq!(aliased.result_key(), "title");
    assert_eq!(aliased.name(), "name");
}

#[test]
fn builds_nested_tree() {
    let query = node([
        field("id"),
        link("friends", [field("name")])
            .alias("pals")
            .option("limit", 10),
    ]);

    let QueryItem::Link(friends) = &query.items[1] else {
        panic!("expected a link, got {:?}", query.items[1]);
    };
    assert_eq!(friends.result_key(), "pals");
    assert_eq!(friends.options.get("limit"), Some(&Value::Int(10)));
    assert_eq!(friends.node, node([field("name")]));
}

#[test]
fn options_keep_order() {
    let item = field("search").option("b", 1).option("a", 2);

    let names: Vec<&str> = item.options().keys().map(String::as_str).collect();
    assert_eq!(names, ["b", "a"]);
}
