//! Schema graph model.
//!
//! A `Graph` is a `Root` plus named `Node`s plus named data types. Nodes
//! and the root hold members: fields (leaf data) and links (edges to other
//! nodes). Graphs are immutable once built; transformations fold an old
//! graph into a new one.

pub mod resolver;
pub mod validate;
pub mod visitor;

#[cfg(test)]
mod graph_tests;

use indexmap::IndexMap;
use skein_core::{Type, Types};

pub use resolver::{
    FieldOutput, FieldRequest, FieldResolver, LinkOutput, LinkResolver, Options, ResolveError,
};
pub use validate::{GraphErrors, validate};
pub use visitor::{GraphTransformer, GraphVisitor};

use crate::Value;

/// Registry key of the root record.
pub const ROOT_TYPE: &str = "__root__";

/// Marks a member as deprecated, optionally with a reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deprecated {
    pub reason: Option<String>,
}

/// Schema directive attached to a node or member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    Deprecated(Deprecated),
}

impl Directive {
    pub fn deprecated(reason: Option<&str>) -> Self {
        Directive::Deprecated(Deprecated {
            reason: reason.map(str::to_owned),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Directive::Deprecated(_) => "deprecated",
        }
    }
}

fn find_deprecated(directives: &[Directive]) -> Option<&Deprecated> {
    directives.iter().find_map(|d| match d {
        Directive::Deprecated(dep) => Some(dep),
    })
}

/// Argument accepted by a field or link.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionDef {
    pub name: String,
    pub ty: Type,
    /// `None` means the option has no default and must be given.
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl OptionDef {
    pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
            description: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Leaf member. Fields without a type are exposed as `Any`.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: String,
    pub ty: Option<Type>,
    pub resolver: FieldResolver,
    pub options: Vec<OptionDef>,
    pub directives: Vec<Directive>,
    pub description: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<Type>, resolver: FieldResolver) -> Self {
        Self {
            ty: Some(ty.into()),
            ..Self::untyped(name, resolver)
        }
    }

    pub fn untyped(name: impl Into<String>, resolver: FieldResolver) -> Self {
        Self {
            name: name.into(),
            ty: None,
            resolver,
            options: Vec::new(),
            directives: Vec::new(),
            description: None,
        }
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = OptionDef>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn with_directives(mut self, directives: impl IntoIterator<Item = Directive>) -> Self {
        self.directives.extend(directives);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declared type, `Any` when untyped.
    pub fn type_or_any(&self) -> Type {
        self.ty.clone().unwrap_or(Type::Any)
    }
}

/// Cardinality of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkShape {
    /// `TypeRef[T]`: exactly one target.
    One,
    /// `Optional[TypeRef[T]]`: zero or one target.
    Maybe,
    /// `Sequence[TypeRef[T]]`: any number of targets.
    Many,
}

/// Edge to another node.
#[derive(Clone, Debug)]
pub struct Link {
    pub name: String,
    pub ty: Type,
    pub resolver: LinkResolver,
    /// Field of the owning node whose values are passed as link ids.
    pub requires: Option<String>,
    pub options: Vec<OptionDef>,
    pub directives: Vec<Directive>,
    pub description: Option<String>,
}

impl Link {
    pub fn new(name: impl Into<String>, ty: impl Into<Type>, resolver: LinkResolver) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            resolver,
            requires: None,
            options: Vec::new(),
            directives: Vec::new(),
            description: None,
        }
    }

    pub fn requires(mut self, field: impl Into<String>) -> Self {
        self.requires = Some(field.into());
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = OptionDef>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn with_directives(mut self, directives: impl IntoIterator<Item = Directive>) -> Self {
        self.directives.extend(directives);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Cardinality and target node name. `None` for any other type shape.
    pub fn shape(&self) -> Option<(LinkShape, &str)> {
        link_shape(&self.ty)
    }
}

pub fn link_shape(ty: &Type) -> Option<(LinkShape, &str)> {
    match ty {
        Type::TypeRef(name) => Some((LinkShape::One, name)),
        Type::Optional(inner) => inner.as_type_ref().map(|name| (LinkShape::Maybe, name)),
        Type::Sequence(item) => item.as_type_ref().map(|name| (LinkShape::Many, name)),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub enum Member {
    Field(Field),
    Link(Link),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(f) => &f.name,
            Member::Link(l) => &l.name,
        }
    }

    /// Type as exposed in the graph's record: links by their target shape,
    /// untyped fields as `Any`.
    pub fn ty(&self) -> Type {
        match self {
            Member::Field(f) => f.type_or_any(),
            Member::Link(l) => l.ty.clone(),
        }
    }

    pub fn options(&self) -> &[OptionDef] {
        match self {
            Member::Field(f) => &f.options,
            Member::Link(l) => &l.options,
        }
    }

    pub fn option(&self, name: &str) -> Option<&OptionDef> {
        self.options().iter().find(|o| o.name == name)
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            Member::Field(f) => &f.directives,
            Member::Link(l) => &l.directives,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Member::Field(f) => f.description.as_deref(),
            Member::Link(l) => l.description.as_deref(),
        }
    }

    pub fn deprecated(&self) -> Option<&Deprecated> {
        find_deprecated(self.directives())
    }
}

impl From<Field> for Member {
    fn from(field: Field) -> Self {
        Member::Field(field)
    }
}

impl From<Link> for Member {
    fn from(link: Link) -> Self {
        Member::Link(link)
    }
}

fn find_member<'a>(members: &'a [Member], name: &str) -> Option<&'a Member> {
    members.iter().find(|m| m.name() == name)
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub members: Vec<Member>,
    pub directives: Vec<Directive>,
    pub description: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
            directives: Vec::new(),
            description: None,
        }
    }

    pub fn with_directives(mut self, directives: impl IntoIterator<Item = Directive>) -> Self {
        self.directives.extend(directives);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        find_member(&self.members, name)
    }
}

/// Entry point members, queried without a parent id.
#[derive(Clone, Debug, Default)]
pub struct Root {
    pub members: Vec<Member>,
}

impl Root {
    pub fn new(members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        find_member(&self.members, name)
    }
}

#[derive(Clone, Debug)]
pub struct Graph {
    root: Root,
    nodes: Vec<Node>,
    data_types: IndexMap<String, Type>,
    types: Types,
}

impl Graph {
    pub fn new(root: Root, nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::with_data_types(root, nodes, IndexMap::new())
    }

    pub fn with_data_types(
        root: Root,
        nodes: impl IntoIterator<Item = Node>,
        data_types: IndexMap<String, Type>,
    ) -> Self {
        let nodes: Vec<Node> = nodes.into_iter().collect();
        let types = graph_types(&root, &nodes, &data_types);
        Self {
            root,
            nodes,
            data_types,
            types,
        }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn data_types(&self) -> &IndexMap<String, Type> {
        &self.data_types
    }

    /// Registry of records: data types, one per node, and the root under
    /// [`ROOT_TYPE`].
    pub fn types(&self) -> &Types {
        &self.types
    }

    /// Members of the root (for [`ROOT_TYPE`]) or of a node.
    pub fn members_of(&self, name: &str) -> Option<&[Member]> {
        if name == ROOT_TYPE {
            return Some(&self.root.members);
        }
        self.node(name).map(|n| n.members.as_slice())
    }

    pub fn into_parts(self) -> (Root, Vec<Node>, IndexMap<String, Type>) {
        (self.root, self.nodes, self.data_types)
    }
}

fn members_record(members: &[Member]) -> Type {
    Type::record(members.iter().map(|m| (m.name(), m.ty())))
}

fn graph_types(root: &Root, nodes: &[Node], data_types: &IndexMap<String, Type>) -> Types {
    let mut types: Types = data_types
        .iter()
        .map(|(name, ty)| (name.as_str(), ty.clone()))
        .collect();
    for node in nodes {
        types.insert(node.name.clone(), members_record(&node.members));
    }
    types.insert(ROOT_TYPE, members_record(&root.members));
    types
}
