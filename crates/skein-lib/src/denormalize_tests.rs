use indexmap::IndexMap;
use serde_json::json;
use skein_core::Type;

use crate::Value;
use crate::denormalize::*;
use crate::graph::{Field, FieldResolver, Graph, Link, LinkResolver, Node, ResolveError, Root};
use crate::query::{QueryNode, field, link, node};

fn noop_field() -> FieldResolver {
    FieldResolver::new(|_, _| Err(ResolveError::NotImplemented("noop")))
}

fn noop_link() -> LinkResolver {
    LinkResolver::new(|_, _| Err(ResolveError::NotImplemented("noop")))
}

fn graph() -> Graph {
    let mut data_types = IndexMap::new();
    data_types.insert(
        "Point".to_owned(),
        Type::record([("x", Type::Integer), ("y", Type::Integer)]),
    );
    Graph::with_data_types(
        Root::new([
            Field::new("count", Type::Integer, noop_field()).into(),
            Field::new("origin", "Point", noop_field()).into(),
            Field::new("path", Type::sequence("Point"), noop_field()).into(),
            Link::new("user", "User", noop_link()).into(),
            Link::new("users", Type::sequence("User"), noop_link()).into(),
            Link::new("admin", Type::optional("User"), noop_link()).into(),
        ]),
        [Node::new(
            "User",
            [
                Field::new("name", Type::String, noop_field()).into(),
                Field::new("age", Type::Integer, noop_field()).into(),
            ],
        )],
        data_types,
    )
}

fn project(data: serde_json::Value, query: &QueryNode) -> Result<Value, DenormalizeError> {
    let data = Value::from(data);
    denormalize(&graph(), &data, query)
}

fn to_json(value: Value) -> serde_json::Value {
    serde_json::to_value(&value).expect("serializable")
}

#[test]
fn fields_and_links_in_query_order() {
    let data = json!({
        "count": 2,
        "user": {"name": "ann", "age": 31},
        "users": [{"name": "bob", "age": 40}, {"name": "cid", "age": 22}],
        "admin": null,
    });
    let query = node([
        link("users", [field("name")]),
        field("count"),
        link("user", [field("age"), field("name")]),
        link("admin", [field("name")]),
    ]);

    let result = project(data, &query).expect("projected");

    let keys: Vec<&str> = result
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["users", "count", "user", "admin"]);
    assert_eq!(
        to_json(result),
        json!({
            "users": [{"name": "bob"}, {"name": "cid"}],
            "count": 2,
            "user": {"age": 31, "name": "ann"},
            "admin": null,
        })
    );
}

#[test]
fn aliases_are_read_and_written_by_result_key() {
    let data = json!({
        "total": 5,
        "me": {"nick": "ann"},
    });
    let query = node([
        field("count").alias("total"),
        link("user", [field("name").alias("nick")]).alias("me"),
    ]);

    let result = project(data, &query).expect("projected");

    assert_eq!(to_json(result), json!({"total": 5, "me": {"nick": "ann"}}));
}

#[test]
fn optional_link_with_target() {
    let data = json!({"admin": {"name": "root", "age": 99}});
    let query = node([link("admin", [field("name")])]);

    let result = project(data, &query).expect("projected");

    assert_eq!(to_json(result), json!({"admin": {"name": "root"}}));
}

#[test]
fn data_type_fields_project_like_links() {
    let data = json!({
        "origin": {"x": 0, "y": 0},
        "path": [{"x": 1, "y": 2}, {"x": 3, "y": 4}],
    });
    let query = node([
        link("origin", [field("x")]),
        link("path", [field("y")]),
    ]);

    let result = project(data, &query).expect("projected");

    assert_eq!(
        to_json(result),
        json!({"origin": {"x": 0}, "path": [{"y": 2}, {"y": 4}]})
    );
}

#[test]
fn aliases_inside_data_types_are_read_by_field_name() {
    let data = json!({
        "here": {"x": 5, "y": 6},
        "path": [{"x": 1, "y": 2}],
    });
    let query = node([
        link("origin", [field("y").alias("down"), field("x")]).alias("here"),
        link("path", [field("x").alias("across")]),
    ]);

    let result = project(data, &query).expect("projected");

    assert_eq!(
        to_json(result),
        json!({"here": {"down": 6, "x": 5}, "path": [{"across": 1}]})
    );
}

#[test]
fn data_type_value_of_wrong_shape() {
    let query = node([link("path", [field("x")])]);

    let err = project(json!({"path": {"x": 1}}), &query).expect_err("path is a list");

    assert_eq!(err, DenormalizeError::Mismatch("path".to_owned()));
}

#[test]
fn unknown_data_type_field() {
    let query = node([link("origin", [field("z")])]);

    let err = project(json!({"origin": {"x": 1, "y": 2}}), &query).expect_err("no z in Point");

    assert_eq!(
        err,
        DenormalizeError::UnknownMember {
            name: "z".to_owned(),
            owner: "Point".to_owned(),
        }
    );
}

#[test]
fn scalar_queried_as_link_is_rejected() {
    let data = json!({"count": 1});
    let query = node([link("count", [field("x")])]);

    let err = project(data, &query).expect_err("count is not a link");

    assert_eq!(
        err,
        DenormalizeError::UnexpectedLinkType {
            link: "count".to_owned(),
            ty: Type::Integer,
        }
    );
    assert_eq!(
        err.to_string(),
        "unexpected type of link \"count\": Integer"
    );
}

#[test]
fn missing_value_is_an_error() {
    let query = node([field("count")]);

    let err = project(json!({}), &query).expect_err("no data");

    assert_eq!(err, DenormalizeError::MissingKey("count".to_owned()));
}

#[test]
fn null_for_required_link_is_an_error() {
    let query = node([link("user", [field("name")])]);

    let err = project(json!({"user": null}), &query).expect_err("user is required");

    assert_eq!(err, DenormalizeError::UnexpectedNull("user".to_owned()));
}

#[test]
fn unknown_link_is_an_error() {
    let query = node([link("ghost", [field("name")])]);

    let err = project(json!({"ghost": {}}), &query).expect_err("no such link");

    assert_eq!(
        err,
        DenormalizeError::UnknownMember {
            name: "ghost".to_owned(),
            owner: "__root__".to_owned(),
        }
    );
}

#[test]
fn projector_is_consumed_by_process() {
    let graph = graph();
    let data = Value::from(json!({"count": 7}));
    let projector = Denormalize::new(&graph, &data);
    let query = node([field("count")]);

    let result = projector.process(&query).expect("projected");

    assert_eq!(result.get("count"), Some(&Value::Int(7)));
}
