//! Graph visitors and transformers.
//!
//! `GraphVisitor` is read-only traversal: override `visit_*`, call the
//! matching `walk_*` to keep descending (or omit it to stop).
//!
//! `GraphTransformer` is a fold: each `transform_*` takes ownership of a
//! piece and returns its replacement, the `fold_*` functions rebuild the
//! enclosing structure. The input graph is consumed, never mutated.
//!
//! ```ignore
//! impl GraphTransformer for Rename {
//!     fn transform_field(&mut self, mut field: Field) -> Field {
//!         field.name = field.name.to_uppercase();
//!         field
//!     }
//! }
//! ```

use skein_core::Type;

use super::{Field, Graph, Link, Member, Node, OptionDef, Root};

pub trait GraphVisitor: Sized {
    fn visit_graph(&mut self, graph: &Graph) {
        walk_graph(self, graph);
    }

    fn visit_data_type(&mut self, _name: &str, _ty: &Type) {
        // Leaf: data types carry no members
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_root(&mut self, root: &Root) {
        walk_root(self, root);
    }

    fn visit_member(&mut self, member: &Member) {
        walk_member(self, member);
    }

    fn visit_field(&mut self, field: &Field) {
        walk_options(self, &field.options);
    }

    fn visit_link(&mut self, link: &Link) {
        walk_options(self, &link.options);
    }

    fn visit_option(&mut self, _option: &OptionDef) {}
}

pub fn walk_graph<V: GraphVisitor>(visitor: &mut V, graph: &Graph) {
    for (name, ty) in graph.data_types() {
        visitor.visit_data_type(name, ty);
    }
    for node in graph.nodes() {
        visitor.visit_node(node);
    }
    visitor.visit_root(graph.root());
}

pub fn walk_node<V: GraphVisitor>(visitor: &mut V, node: &Node) {
    for member in &node.members {
        visitor.visit_member(member);
    }
}

pub fn walk_root<V: GraphVisitor>(visitor: &mut V, root: &Root) {
    for member in &root.members {
        visitor.visit_member(member);
    }
}

pub fn walk_member<V: GraphVisitor>(visitor: &mut V, member: &Member) {
    match member {
        Member::Field(field) => visitor.visit_field(field),
        Member::Link(link) => visitor.visit_link(link),
    }
}

pub fn walk_options<V: GraphVisitor>(visitor: &mut V, options: &[OptionDef]) {
    for option in options {
        visitor.visit_option(option);
    }
}

pub trait GraphTransformer: Sized {
    fn transform_graph(&mut self, graph: Graph) -> Graph {
        fold_graph(self, graph)
    }

    fn transform_node(&mut self, node: Node) -> Node {
        fold_node(self, node)
    }

    fn transform_root(&mut self, root: Root) -> Root {
        fold_root(self, root)
    }

    fn transform_member(&mut self, member: Member) -> Member {
        fold_member(self, member)
    }

    fn transform_field(&mut self, field: Field) -> Field {
        field
    }

    fn transform_link(&mut self, link: Link) -> Link {
        link
    }
}

/// Rebuild the graph from transformed nodes and root. Nodes go first, so
/// a transformer sees every node before the root.
pub fn fold_graph<T: GraphTransformer>(transformer: &mut T, graph: Graph) -> Graph {
    let (root, nodes, data_types) = graph.into_parts();
    let nodes: Vec<Node> = nodes
        .into_iter()
        .map(|node| transformer.transform_node(node))
        .collect();
    let root = transformer.transform_root(root);
    Graph::with_data_types(root, nodes, data_types)
}

pub fn fold_node<T: GraphTransformer>(transformer: &mut T, mut node: Node) -> Node {
    node.members = fold_members(transformer, node.members);
    node
}

pub fn fold_root<T: GraphTransformer>(transformer: &mut T, root: Root) -> Root {
    Root {
        members: fold_members(transformer, root.members),
    }
}

pub fn fold_members<T: GraphTransformer>(transformer: &mut T, members: Vec<Member>) -> Vec<Member> {
    members
        .into_iter()
        .map(|member| transformer.transform_member(member))
        .collect()
}

pub fn fold_member<T: GraphTransformer>(transformer: &mut T, member: Member) -> Member {
    match member {
        Member::Field(field) => Member::Field(transformer.transform_field(field)),
        Member::Link(link) => Member::Link(transformer.transform_link(link)),
    }
}
