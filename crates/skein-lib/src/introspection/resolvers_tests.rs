use indexmap::IndexMap;
use skein_core::{Type, TypeVisitor};

use crate::Value;
use crate::graph::{
    Directive, Field, FieldRequest, FieldResolver, Graph, Node, OptionDef, Options, ResolveError,
    Root,
};

use super::resolvers::*;
use super::{Ident, SchemaInfo, TypeIdent, builtin_directives};

fn noop() -> FieldResolver {
    FieldResolver::new(|_, _| Err(ResolveError::NotImplemented("noop")))
}

fn schema() -> SchemaInfo {
    let mut data_types = IndexMap::new();
    data_types.insert("Point".to_owned(), Type::record([("x", Type::Float)]));
    let secret = Field::new("_secret", Type::String, noop());
    let graph = Graph::with_data_types(
        Root::new([Field::new("origin", "Point", noop()).into()]),
        [
            Node::new(
                "User",
                [
                    Field::new("name", Type::String, noop())
                        .with_description("Display name")
                        .with_options([
                            OptionDef::new("upper", Type::Boolean).with_default(false),
                            OptionDef::new("at", "Point"),
                        ])
                        .into(),
                    Field::new("login", Type::String, noop())
                        .with_directives([Directive::deprecated(None)])
                        .into(),
                ],
            )
            .with_description("A person"),
            Node::new("Hidden", [secret.into()]),
        ],
        data_types,
    );
    SchemaInfo::new(graph, None, builtin_directives())
}

fn requests(names: &[&str]) -> Vec<FieldRequest> {
    names.iter().map(|&name| FieldRequest::new(name)).collect()
}

fn ids(idents: impl IntoIterator<Item = Ident>) -> Vec<Value> {
    idents.into_iter().map(Value::Ident).collect()
}

fn idents(value: &Value) -> Vec<String> {
    value
        .as_list()
        .expect("list of idents")
        .iter()
        .map(|v| v.as_ident().expect("ident").to_string())
        .collect()
}

fn include_deprecated(value: bool) -> Options {
    let mut options = Options::new();
    options.insert("includeDeprecated".to_owned(), Value::from(value));
    options
}

#[test]
fn type_info_rows() {
    let schema = schema();
    let fields = requests(&["kind", "name", "description"]);
    let ids = ids([
        Ident::object("User"),
        Ident::non_null(Ident::scalar("Int")),
        Ident::input_object("Point"),
    ]);

    let rows = type_info(&schema, &fields, &ids).unwrap();

    assert_eq!(
        rows,
        [
            vec![
                Value::from("OBJECT"),
                Value::from("User"),
                Value::from("A person"),
            ],
            vec![Value::from("NON_NULL"), Value::Null, Value::Null],
            vec![
                Value::from("INPUT_OBJECT"),
                Value::from("IOPoint"),
                Value::Null,
            ],
        ]
    );
}

#[test]
fn type_info_rejects_non_type_ids() {
    let schema = schema();
    let id = Ident::Directive("skip".to_owned());

    let err = type_info(&schema, &requests(&["kind"]), &ids([id])).unwrap_err();

    assert_eq!(err, ResolveError::UnexpectedId("@skip".to_owned()));
}

#[test]
fn fields_of_objects() {
    let schema = schema();
    let ids = ids([
        Ident::object("User"),
        Ident::object("Point"),
        Ident::scalar("Int"),
    ]);

    let all = type_fields_link(&schema, &ids, &include_deprecated(true)).unwrap();
    let current = type_fields_link(&schema, &ids, &include_deprecated(false)).unwrap();

    assert_eq!(idents(&all[0]), ["User.name", "User.login"]);
    assert_eq!(idents(&current[0]), ["User.name"]);
    assert_eq!(idents(&all[1]), ["Point.x"]);
    assert_eq!(all[2], Value::List(Vec::new()));
}

#[test]
fn object_without_exposed_fields() {
    let schema = schema();

    let err = type_fields_link(&schema, &ids([Ident::object("Hidden")]), &Options::new())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "object type \"Hidden\" does not contain fields, which is not acceptable for GraphQL in order to define schema type"
    );
}

#[test]
fn field_rows() {
    let schema = schema();
    let names = ["name", "description", "isDeprecated", "deprecationReason"];
    let fields = requests(&names);
    let ids = ids([
        Ident::Field {
            node: "User".to_owned(),
            name: "login".to_owned(),
        },
        Ident::Field {
            node: "Point".to_owned(),
            name: "x".to_owned(),
        },
    ]);

    let rows = field_info(&schema, &fields, &ids).unwrap();

    assert_eq!(
        rows,
        [
            vec![
                Value::from("login"),
                Value::Null,
                Value::from(true),
                Value::Null,
            ],
            vec![
                Value::from("x"),
                Value::Null,
                Value::from(false),
                Value::Null,
            ],
        ]
    );
}

#[test]
fn field_arguments_and_their_types() {
    let schema = schema();
    let name = ids([Ident::Field {
        node: "User".to_owned(),
        name: "name".to_owned(),
    }]);

    let args = field_args_link(&schema, &name, &Options::new()).unwrap();
    let arg_ids = args[0].as_list().unwrap().to_vec();
    let info = input_value_info(&schema, &requests(&["name", "defaultValue"]), &arg_ids).unwrap();
    let types = input_value_type_link(&schema, &arg_ids, &Options::new()).unwrap();

    assert_eq!(idents(&args[0]), ["User.name(upper)", "User.name(at)"]);
    assert_eq!(
        info,
        [
            vec![Value::from("upper"), Value::from("false")],
            vec![Value::from("at"), Value::Null],
        ]
    );
    assert_eq!(
        types,
        [
            Value::Ident(Ident::non_null(Ident::scalar("Boolean"))),
            Value::Ident(Ident::non_null(Ident::input_object("Point"))),
        ]
    );
}

#[test]
fn input_object_fields() {
    let schema = schema();

    let fields = type_input_fields_link(
        &schema,
        &ids([Ident::input_object("Point"), Ident::object("Point")]),
        &Options::new(),
    )
    .unwrap();

    assert_eq!(idents(&fields[0]), ["IOPoint.x"]);
    assert_eq!(fields[1], Value::List(Vec::new()));
}

#[test]
fn type_lookup() {
    let schema = schema();
    let lookup = |name: &str| {
        let mut options = Options::new();
        options.insert("name".to_owned(), Value::from(name));
        let mut found = type_link(&schema, &[Value::Null], &options).unwrap();
        found.remove(0)
    };

    assert_eq!(lookup("User"), Value::Ident(Ident::object("User")));
    assert_eq!(lookup("Query"), Value::Ident(Ident::object("Query")));
    assert_eq!(lookup("Point"), Value::Ident(Ident::object("Point")));
    assert_eq!(
        lookup("IOPoint"),
        Value::Ident(Ident::input_object("Point"))
    );
    assert_eq!(lookup("Float"), Value::Ident(Ident::scalar("Float")));
    assert_eq!(lookup("IOUser"), Value::Null);
    assert_eq!(lookup("Mutation"), Value::Null);
}

#[test]
fn schema_types_order() {
    let schema = schema();

    let types = schema_types(&schema, &[Value::Null], &Options::new()).unwrap();

    assert_eq!(
        idents(&types[0]),
        [
            "SCALAR(String)",
            "SCALAR(Int)",
            "SCALAR(Boolean)",
            "SCALAR(Float)",
            "SCALAR(Any)",
            "OBJECT(User)",
            "OBJECT(Hidden)",
            "OBJECT(Query)",
            "OBJECT(Point)",
            "INPUT_OBJECT(IOPoint)",
        ]
    );
}

#[test]
fn directive_arguments_by_name() {
    let schema = schema();

    let args = directive_args_link(
        &schema,
        &[Value::from("deprecated"), Value::from("cached")],
        &Options::new(),
    )
    .unwrap();

    assert_eq!(idents(&args[0]), ["@deprecated(reason)"]);
    assert_eq!(idents(&args[1]), ["@cached(ttl)"]);
}

fn ident_of(visitor: &mut TypeIdent<'_>, ty: Type) -> Result<String, ResolveError> {
    visitor.visit(&ty).map(|ident| ident.to_string())
}

#[test]
fn type_identities() {
    let schema = schema();
    let mut output = schema.type_ident(false);
    let mut input = schema.type_ident(true);

    assert_eq!(
        ident_of(&mut output, Type::Integer).unwrap(),
        "NON_NULL(SCALAR(Int))"
    );
    assert_eq!(
        ident_of(&mut output, Type::optional(Type::sequence("User"))).unwrap(),
        "LIST(NON_NULL(OBJECT(User)))"
    );
    assert_eq!(
        ident_of(&mut output, Type::mapping(Type::String, Type::Integer)).unwrap(),
        "SCALAR(Any)"
    );
    assert_eq!(
        ident_of(&mut input, Type::optional("Point")).unwrap(),
        "INPUT_OBJECT(IOPoint)"
    );
    assert_eq!(
        ident_of(&mut input, Type::type_ref("User")).unwrap_err(),
        ResolveError::Unsupported("TypeRef['User'] as input".to_owned())
    );
    assert_eq!(
        ident_of(&mut output, Type::callable([Type::String])).unwrap_err(),
        ResolveError::Unsupported("Callable[String]".to_owned())
    );
}

#[test]
fn enum_values_are_not_implemented() {
    let schema = schema();

    let err = not_implemented(&schema, &requests(&["name"]), &[Value::Null]).unwrap_err();

    assert_eq!(err.to_string(), "__EnumValue is not implemented");
}
