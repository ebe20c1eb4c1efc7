use indexmap::IndexMap;
use skein_core::Type;

use super::*;

fn noop_field() -> FieldResolver {
    FieldResolver::new(|_, _| Err(ResolveError::NotImplemented("noop")))
}

fn noop_link() -> LinkResolver {
    LinkResolver::new(|_, _| Err(ResolveError::NotImplemented("noop")))
}

#[test]
fn types_registry_covers_nodes_root_and_data_types() {
    let mut data_types = IndexMap::new();
    data_types.insert("Point".to_owned(), Type::record([("x", Type::Float)]));
    let users = Link::new("users", Type::sequence("User"), noop_link());
    let graph = Graph::with_data_types(
        Root::new([users.into()]),
        [Node::new(
            "User",
            [
                Field::new("name", Type::String, noop_field()).into(),
                Field::untyped("extra", noop_field()).into(),
            ],
        )],
        data_types,
    );

    let types = graph.types();
    let point = Type::record([("x", Type::Float)]);
    let user = Type::record([("name", Type::String), ("extra", Type::Any)]);
    assert_eq!(types.get("Point"), Some(&point));
    assert_eq!(types.get("User"), Some(&user));
    assert_eq!(
        types.get(ROOT_TYPE),
        Some(&Type::record([("users", Type::sequence("User"))]))
    );
}

#[test]
fn link_shapes() {
    let one = Link::new("a", "User", noop_link());
    let maybe = Link::new("b", Type::optional("User"), noop_link());
    let many = Link::new("c", Type::sequence("User"), noop_link());
    let other = Link::new("d", Type::sequence(Type::Integer), noop_link());

    assert_eq!(one.shape(), Some((LinkShape::One, "User")));
    assert_eq!(maybe.shape(), Some((LinkShape::Maybe, "User")));
    assert_eq!(many.shape(), Some((LinkShape::Many, "User")));
    assert_eq!(other.shape(), None);
}

#[test]
fn member_accessors() {
    let member: Member = Field::new("age", Type::Integer, noop_field())
        .with_options([OptionDef::new("unit", Type::String).with_default("years")])
        .with_directives([Directive::deprecated(Some("use birthday"))])
        .with_description("Age in years")
        .into();

    assert_eq!(member.name(), "age");
    assert_eq!(member.ty(), Type::Integer);
    assert_eq!(member.description(), Some("Age in years"));
    assert_eq!(
        member.option("unit").and_then(|o| o.default.clone()),
        Some(Value::from("years"))
    );
    assert_eq!(
        member.deprecated(),
        Some(&Deprecated {
            reason: Some("use birthday".to_owned()),
        })
    );
    assert!(member.option("missing").is_none());
}

#[test]
fn node_and_root_lookup() {
    let version = Field::new("version", Type::String, noop_field());
    let name = Field::new("name", Type::String, noop_field());
    let graph = Graph::new(
        Root::new([version.into()]),
        [Node::new("User", [name.into()])],
    );

    assert!(graph.node("User").is_some());
    assert!(graph.node("Nope").is_none());
    assert!(graph.root().member("version").is_some());
    assert_eq!(graph.members_of(ROOT_TYPE).map(<[Member]>::len), Some(1));
    assert_eq!(graph.members_of("User").map(<[Member]>::len), Some(1));
}

#[test]
fn cloned_resolvers_share_identity() {
    let resolver = noop_field();
    let clone = resolver.clone();
    let other = noop_field();

    assert!(resolver.same(&clone));
    assert!(!resolver.same(&other));
    assert!(!resolver.is_async());
    assert!(resolver.into_async().is_async());
}
