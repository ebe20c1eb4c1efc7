//! The meta-schema graph: `__Type`, `__Field`, `__InputValue`,
//! `__Directive`, `__EnumValue`, `__Schema` and the `__schema` / `__type`
//! root links.

use std::sync::Arc;

use skein_core::Type;

use super::resolvers;
use super::schema::SchemaInfo;
use crate::Value;
use crate::graph::{
    Field, FieldOutput, FieldRequest, FieldResolver, Graph, Link, LinkOutput, LinkResolver, Node,
    OptionDef, Options, Root,
};

type FieldFn = fn(&SchemaInfo, &[FieldRequest], &[Value]) -> FieldOutput;
type LinkFn = fn(&SchemaInfo, &[Value], &Options) -> LinkOutput;

fn bind_field(schema: &Arc<SchemaInfo>, f: FieldFn) -> FieldResolver {
    let schema = Arc::clone(schema);
    FieldResolver::new(move |fields, ids| f(&schema, fields, ids))
}

fn bind_link(schema: &Arc<SchemaInfo>, f: LinkFn) -> LinkResolver {
    let schema = Arc::clone(schema);
    LinkResolver::new(move |ids, options| f(&schema, ids, options))
}

fn many(name: &str) -> Type {
    Type::sequence(name)
}

fn include_deprecated() -> OptionDef {
    OptionDef::new("includeDeprecated", Type::Boolean).with_default(false)
}

/// Build the meta graph with every resolver bound to `schema`.
///
/// Fields sharing a resolver function share one bound resolver, so the
/// engine fetches them in one batch.
pub fn introspection_graph(schema: &Arc<SchemaInfo>) -> Graph {
    let type_info = bind_field(schema, resolvers::type_info);
    let field_info = bind_field(schema, resolvers::field_info);
    let input_value_info = bind_field(schema, resolvers::input_value_info);
    let directive_info = bind_field(schema, resolvers::directive_info);
    let not_implemented = bind_field(schema, resolvers::not_implemented);
    let na_many = bind_link(schema, resolvers::na_many);

    let type_node = Node::new(
        "__Type",
        [
            Field::untyped("id", type_info.clone()).into(),
            Field::new("kind", Type::String, type_info.clone()).into(),
            Field::new("name", Type::String, type_info.clone()).into(),
            Field::new("description", Type::String, type_info).into(),
            Link::new(
                "fields",
                many("__Field"),
                bind_link(schema, resolvers::type_fields_link),
            )
            .requires("id")
            .with_options([include_deprecated()])
            .into(),
            Link::new("interfaces", many("__Type"), na_many.clone())
                .requires("id")
                .into(),
            Link::new("possibleTypes", many("__Type"), na_many.clone())
                .requires("id")
                .into(),
            Link::new("enumValues", many("__EnumValue"), na_many)
                .requires("id")
                .with_options([include_deprecated()])
                .into(),
            Link::new(
                "inputFields",
                many("__InputValue"),
                bind_link(schema, resolvers::type_input_fields_link),
            )
            .requires("id")
            .into(),
            Link::new(
                "ofType",
                Type::optional("__Type"),
                bind_link(schema, resolvers::type_of_type_link),
            )
            .requires("id")
            .into(),
        ],
    );

    let field_node = Node::new(
        "__Field",
        [
            Field::untyped("id", field_info.clone()).into(),
            Field::new("name", Type::String, field_info.clone()).into(),
            Field::new("description", Type::String, field_info.clone()).into(),
            Link::new(
                "args",
                many("__InputValue"),
                bind_link(schema, resolvers::field_args_link),
            )
            .requires("id")
            .into(),
            Link::new(
                "type",
                "__Type",
                bind_link(schema, resolvers::field_type_link),
            )
            .requires("id")
            .into(),
            Field::new("isDeprecated", Type::Boolean, field_info.clone()).into(),
            Field::new("deprecationReason", Type::String, field_info).into(),
        ],
    );

    let input_value_node = Node::new(
        "__InputValue",
        [
            Field::untyped("id", input_value_info.clone()).into(),
            Field::new("name", Type::String, input_value_info.clone()).into(),
            Field::new("description", Type::String, input_value_info.clone()).into(),
            Link::new(
                "type",
                "__Type",
                bind_link(schema, resolvers::input_value_type_link),
            )
            .requires("id")
            .into(),
            Field::new("defaultValue", Type::String, input_value_info).into(),
        ],
    );

    let directive_node = Node::new(
        "__Directive",
        [
            Field::new("name", Type::String, directive_info.clone()).into(),
            Field::new("description", Type::String, directive_info.clone()).into(),
            Field::new("locations", Type::sequence(Type::String), directive_info).into(),
            Link::new(
                "args",
                many("__InputValue"),
                bind_link(schema, resolvers::directive_args_link),
            )
            .requires("name")
            .into(),
        ],
    );

    let enum_value_node = Node::new(
        "__EnumValue",
        [
            Field::new("name", Type::String, not_implemented.clone()).into(),
            Field::new("description", Type::String, not_implemented.clone()).into(),
            Field::new("isDeprecated", Type::Boolean, not_implemented.clone()).into(),
            Field::new("deprecationReason", Type::String, not_implemented).into(),
        ],
    );

    let schema_node = Node::new(
        "__Schema",
        [
            Link::new(
                "types",
                many("__Type"),
                bind_link(schema, resolvers::schema_types),
            )
            .into(),
            Link::new(
                "queryType",
                "__Type",
                bind_link(schema, resolvers::schema_query_type),
            )
            .into(),
            Link::new(
                "mutationType",
                Type::optional("__Type"),
                bind_link(schema, resolvers::schema_mutation_type),
            )
            .into(),
            Link::new(
                "subscriptionType",
                Type::optional("__Type"),
                bind_link(schema, resolvers::na_maybe),
            )
            .into(),
            Link::new(
                "directives",
                many("__Directive"),
                bind_link(schema, resolvers::schema_directives),
            )
            .into(),
        ],
    );

    let root = Root::new([
        Link::new(
            "__schema",
            "__Schema",
            bind_link(schema, resolvers::schema_link),
        )
        .into(),
        Link::new(
            "__type",
            Type::optional("__Type"),
            bind_link(schema, resolvers::type_link),
        )
        .with_options([OptionDef::new("name", Type::String)])
        .into(),
    ]);

    Graph::new(
        root,
        [
            type_node,
            field_node,
            input_value_node,
            directive_node,
            enum_value_node,
            schema_node,
        ],
    )
}
