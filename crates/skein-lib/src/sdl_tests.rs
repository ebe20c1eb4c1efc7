use indexmap::IndexMap;
use skein_core::Type;

use crate::Value;
use crate::graph::{
    Directive, Field, FieldResolver, Graph, Link, LinkResolver, Node, OptionDef, ResolveError,
    Root,
};
use crate::introspection::introspect;
use crate::sdl::{Config, Printer, SdlError, print_sdl};

fn noop_field() -> FieldResolver {
    FieldResolver::new(|_, _| Err(ResolveError::NotImplemented("noop")))
}

fn noop_link() -> LinkResolver {
    LinkResolver::new(|_, _| Err(ResolveError::NotImplemented("noop")))
}

fn user_graph() -> Graph {
    let mut data_types = IndexMap::new();
    data_types.insert(
        "Point".to_owned(),
        Type::record([("x", Type::Float), ("y", Type::optional(Type::Float))]),
    );
    Graph::with_data_types(
        Root::new([
            Link::new("user", "User", noop_link())
                .with_options([OptionDef::new("id", Type::Integer)])
                .into(),
            Field::new("origin", "Point", noop_field()).into(),
            Link::new("me", Type::optional("User"), noop_link()).into(),
        ]),
        [Node::new(
            "User",
            [
                Field::new("name", Type::String, noop_field())
                    .with_directives([Directive::deprecated(Some("use login"))])
                    .into(),
                Field::new("login", Type::String, noop_field()).into(),
                Link::new("friends", Type::sequence("User"), noop_link())
                    .with_options([OptionDef::new("limit", Type::Integer).with_default(10i64)])
                    .into(),
                Field::new("avatar", Type::optional(Type::String), noop_field())
                    .with_options([
                        OptionDef::new("size", Type::Integer)
                            .with_default(64i64)
                            .with_description("Pixels"),
                        OptionDef::new("format", Type::optional(Type::String))
                            .with_default(Value::Null),
                    ])
                    .into(),
            ],
        )],
        data_types,
    )
}

#[test]
fn prints_graph() {
    let sdl = print_sdl(&user_graph()).unwrap();

    insta::assert_snapshot!(sdl, @r#"
    scalar Any

    type Point {
      x: Float!
      y: Float
    }

    type User {
      name: String! @deprecated(reason: "use login")
      login: String!
      friends(limit: Int! = 10): [User!]!
      avatar(
        "Pixels"
        size: Int! = 64
        format: String = null
      ): String
    }

    extend type Query {
      user(id: Int!): User!
      origin: Point!
      me: User
    }
    "#);
}

#[test]
fn introspection_is_stripped() {
    let graph = user_graph();
    let bound = introspect(graph.clone()).unwrap();

    assert_eq!(print_sdl(&bound).unwrap(), print_sdl(&graph).unwrap());
}

#[test]
fn list_defaults_and_indent() {
    let graph = Graph::new(
        Root::new([Field::new("tags", Type::sequence(Type::String), noop_field())
            .with_options([
                OptionDef::new("prefix", Type::sequence(Type::String))
                    .with_default(vec!["a\"b", "c"]),
                OptionDef::new("_entities", Type::Boolean).with_default(true),
            ])
            .into()]),
        [],
    );

    let sdl = Printer::new(Config::new().indent(4)).print(&graph).unwrap();

    insta::assert_snapshot!(sdl, @r#"
    scalar Any

    extend type Query {
        tags(prefix: [String!]! = ["a\"b", "c"], _entities: Boolean! = true): [String!]!
    }
    "#);
}

#[test]
fn unsupported_type() {
    let graph = Graph::new(
        Root::new([
            Field::new("meta", Type::mapping(Type::String, Type::Any), noop_field()).into(),
        ]),
        [],
    );

    let err = print_sdl(&graph).unwrap_err();

    assert_eq!(
        err,
        SdlError::UnsupportedType {
            owner: "Query".to_owned(),
            name: "meta".to_owned(),
            ty: Type::mapping(Type::String, Type::Any),
        }
    );
    assert_eq!(
        err.to_string(),
        "Query.meta: unsupported type Mapping[String, Any]"
    );
}
