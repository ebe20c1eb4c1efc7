//! Binding introspection into a graph.

use std::collections::HashMap;
use std::sync::Arc;

use skein_core::Type;

use super::config::IntrospectionConfig;
use super::meta::introspection_graph;
use super::schema::{QUERY_ROOT_NAME, SchemaInfo};
use crate::Value;
use crate::graph::visitor::{fold_graph, fold_node, fold_root};
use crate::graph::{
    Field, FieldResolver, Graph, GraphErrors, GraphTransformer, Link, LinkResolver, Node, Root,
    validate,
};

pub const TYPENAME_FIELD: &str = "__typename";

/// `__typename` field answering `name` for every id.
pub fn typename_field(name: &str) -> Field {
    let name = name.to_owned();
    let resolver = FieldResolver::new(move |fields, ids| {
        let row: Vec<Value> = fields.iter().map(|_| Value::from(name.as_str())).collect();
        Ok(vec![row; ids.len()])
    });
    Field::new(TYPENAME_FIELD, Type::String, resolver)
}

/// Makes a graph introspectable through the GraphQL meta-schema.
///
/// ```ignore
/// let graph = GraphQLIntrospection::new(graph.clone()).apply(graph)?;
/// ```
pub struct GraphQLIntrospection {
    query_graph: Graph,
    mutation_graph: Option<Graph>,
    config: IntrospectionConfig,
}

impl GraphQLIntrospection {
    /// `query_graph` is the graph whose root is exposed as `Query`.
    pub fn new(query_graph: Graph) -> Self {
        Self {
            query_graph,
            mutation_graph: None,
            config: IntrospectionConfig::default(),
        }
    }

    /// Expose the root of `mutation_graph` as `Mutation`.
    pub fn with_mutation(mut self, mutation_graph: Graph) -> Self {
        self.mutation_graph = Some(mutation_graph);
        self
    }

    pub fn with_config(mut self, config: IntrospectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate `graph`, then extend it with `__typename` on every node
    /// and the root, the meta-schema nodes and the `__schema` / `__type`
    /// root links.
    pub fn apply(self, graph: Graph) -> Result<Graph, GraphErrors> {
        validate(&graph)?;
        let asynchronous = self.config.asynchronous;
        let schema = Arc::new(SchemaInfo::new(
            self.query_graph,
            self.mutation_graph,
            self.config.directives,
        ));
        let meta = introspection_graph(&schema);
        log::debug!(
            "built introspection schema: {} node(s), {} directive(s)",
            meta.nodes().len(),
            schema.directives().len()
        );

        let graph = AddIntrospection { meta: Some(meta) }.transform_graph(graph);
        if asynchronous {
            return Ok(MakeAsync::new().transform_graph(graph));
        }
        Ok(graph)
    }
}

/// Validate and bind `graph` with the default configuration.
pub fn introspect(graph: Graph) -> Result<Graph, GraphErrors> {
    GraphQLIntrospection::new(graph.clone()).apply(graph)
}

/// Injects `__typename` and merges the meta graph in. User nodes are
/// folded before the meta nodes are appended, so those carry no
/// `__typename`.
struct AddIntrospection {
    meta: Option<Graph>,
}

impl GraphTransformer for AddIntrospection {
    fn transform_graph(&mut self, graph: Graph) -> Graph {
        let graph = fold_graph(self, graph);
        let Some(meta) = self.meta.take() else {
            return graph;
        };
        let (mut root, mut nodes, data_types) = graph.into_parts();
        let (meta_root, meta_nodes, _) = meta.into_parts();
        nodes.extend(meta_nodes);
        root.members.extend(meta_root.members);
        Graph::with_data_types(root, nodes, data_types)
    }

    fn transform_node(&mut self, node: Node) -> Node {
        let mut node = fold_node(self, node);
        let typename = typename_field(&node.name);
        node.members.push(typename.into());
        node
    }

    fn transform_root(&mut self, root: Root) -> Root {
        let mut root = fold_root(self, root);
        root.members.push(typename_field(QUERY_ROOT_NAME).into());
        root
    }
}

/// Rewraps every blocking resolver into one returning a ready future.
///
/// Wrappers are memoized by resolver identity: fields that shared a
/// resolver before share the wrapped one after, so batching is kept.
#[derive(Default)]
pub struct MakeAsync {
    fields: HashMap<usize, FieldResolver>,
    links: HashMap<usize, LinkResolver>,
}

impl MakeAsync {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphTransformer for MakeAsync {
    fn transform_field(&mut self, mut field: Field) -> Field {
        let resolver = field.resolver;
        field.resolver = self
            .fields
            .entry(resolver.id())
            .or_insert_with(|| resolver.into_async())
            .clone();
        field
    }

    fn transform_link(&mut self, mut link: Link) -> Link {
        let resolver = link.resolver;
        link.resolver = self
            .links
            .entry(resolver.id())
            .or_insert_with(|| resolver.into_async())
            .clone();
        link
    }
}
