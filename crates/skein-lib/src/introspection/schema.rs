//! Schema snapshot read by the introspection resolvers.

use indexmap::IndexMap;
use skein_core::{Fields, Type, TypeVisitor};

use super::Ident;
use super::directives::DirectiveDef;
use crate::graph::validate::is_exposed;
use crate::graph::{Graph, Member, ResolveError};

pub const QUERY_ROOT_NAME: &str = "Query";
pub const MUTATION_ROOT_NAME: &str = "Mutation";

/// Scalars listed first in `__schema.types`.
pub const SCALARS: [&str; 5] = ["String", "Int", "Boolean", "Float", "Any"];

/// Object type backed by a node or a root.
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
    pub members: &'a [Member],
    pub description: Option<&'a str>,
}

impl<'a> NodeView<'a> {
    pub fn member(&self, name: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Members visible to introspection.
    pub fn exposed(&self) -> impl Iterator<Item = &'a Member> {
        self.members.iter().filter(|m| is_exposed(m.name()))
    }
}

/// Immutable view of the schema being introspected.
#[derive(Debug)]
pub struct SchemaInfo {
    query_graph: Graph,
    mutation_graph: Option<Graph>,
    directives: Vec<DirectiveDef>,
}

impl SchemaInfo {
    pub fn new(
        query_graph: Graph,
        mutation_graph: Option<Graph>,
        directives: Vec<DirectiveDef>,
    ) -> Self {
        Self {
            query_graph,
            mutation_graph,
            directives,
        }
    }

    pub fn query_graph(&self) -> &Graph {
        &self.query_graph
    }

    pub fn mutation_graph(&self) -> Option<&Graph> {
        self.mutation_graph.as_ref()
    }

    pub fn data_types(&self) -> &IndexMap<String, Type> {
        self.query_graph.data_types()
    }

    /// Record fields of data type `name`.
    pub fn data_type(&self, name: &str) -> Option<&Fields> {
        self.data_types().get(name).and_then(Type::as_record)
    }

    pub fn directives(&self) -> &[DirectiveDef] {
        &self.directives
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDef> {
        self.directives.iter().find(|d| d.name == name)
    }

    /// Node-backed object types: every node, then `Query`, then `Mutation`.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, NodeView<'_>)> {
        let nodes = self.query_graph.nodes().iter().map(|n| {
            (
                n.name.as_str(),
                NodeView {
                    members: &n.members,
                    description: n.description.as_deref(),
                },
            )
        });
        let query = std::iter::once((
            QUERY_ROOT_NAME,
            NodeView {
                members: &self.query_graph.root().members,
                description: None,
            },
        ));
        let mutation = self.mutation_graph.iter().map(|g| {
            (
                MUTATION_ROOT_NAME,
                NodeView {
                    members: &g.root().members,
                    description: None,
                },
            )
        });
        nodes.chain(query).chain(mutation)
    }

    /// Object type by name. Roots shadow nodes of the same name, the
    /// mutation root shadows the query root.
    pub fn node(&self, name: &str) -> Option<NodeView<'_>> {
        self.nodes()
            .filter(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .last()
    }

    pub fn type_ident(&self, input_mode: bool) -> TypeIdent<'_> {
        TypeIdent {
            data_types: self.data_types(),
            input_mode,
        }
    }
}

/// Maps a schema type to the identity of its GraphQL type.
pub struct TypeIdent<'a> {
    data_types: &'a IndexMap<String, Type>,
    input_mode: bool,
}

type IdentResult = Result<Ident, ResolveError>;

impl TypeVisitor for TypeIdent<'_> {
    type Output = IdentResult;

    fn visit_any(&mut self) -> IdentResult {
        Ok(Ident::scalar("Any"))
    }

    fn visit_boolean(&mut self) -> IdentResult {
        Ok(Ident::non_null(Ident::scalar("Boolean")))
    }

    fn visit_string(&mut self) -> IdentResult {
        Ok(Ident::non_null(Ident::scalar("String")))
    }

    fn visit_integer(&mut self) -> IdentResult {
        Ok(Ident::non_null(Ident::scalar("Int")))
    }

    fn visit_float(&mut self) -> IdentResult {
        Ok(Ident::non_null(Ident::scalar("Float")))
    }

    fn visit_optional(&mut self, inner: &Type) -> IdentResult {
        Ok(self.visit(inner)?.nullable())
    }

    fn visit_sequence(&mut self, item: &Type) -> IdentResult {
        Ok(Ident::non_null(Ident::list(self.visit(item)?)))
    }

    fn visit_mapping(&mut self, _key: &Type, _value: &Type) -> IdentResult {
        Ok(Ident::scalar("Any"))
    }

    fn visit_record(&mut self, _fields: &Fields) -> IdentResult {
        // inline records have no GraphQL counterpart
        Ok(Ident::scalar("Any"))
    }

    fn visit_callable(&mut self, args: &[Type]) -> IdentResult {
        let ty = Type::Callable(args.to_vec());
        Err(ResolveError::Unsupported(ty.to_string()))
    }

    fn visit_type_ref(&mut self, name: &str) -> IdentResult {
        if !self.input_mode {
            return Ok(Ident::non_null(Ident::object(name)));
        }
        if !self.data_types.contains_key(name) {
            return Err(ResolveError::Unsupported(format!(
                "TypeRef['{name}'] as input"
            )));
        }
        Ok(Ident::non_null(Ident::input_object(name)))
    }
}
