//! GraphQL SDL export.
//!
//! Prints a graph as schema definition text: the `Any` scalar, data types,
//! nodes, and the root as an extension of `Query`. Introspection nodes and
//! injected `__typename` fields are stripped first.

use skein_core::Type;

use crate::Value;
use crate::graph::visitor::{fold_graph, fold_node, fold_root};
use crate::graph::{Directive, Graph, GraphTransformer, Member, Node, OptionDef, Root};
use crate::introspection::{QUERY_ROOT_NAME, TYPENAME_FIELD};

/// Root members never exported.
const HIDDEN_ROOT_MEMBERS: [&str; 2] = [TYPENAME_FIELD, "_entities"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SdlError {
    #[error("{owner}.{name}: unsupported type {ty}")]
    UnsupportedType {
        owner: String,
        name: String,
        ty: Type,
    },
}

/// Printer configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Spaces per indentation level
    pub(crate) indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, value: usize) -> Self {
        self.indent = value;
        self
    }
}

/// Print `graph` with the default configuration.
pub fn print_sdl(graph: &Graph) -> Result<String, SdlError> {
    Printer::new(Config::default()).print(graph)
}

/// Removes what introspection adds: `__`-prefixed nodes, `__typename`
/// fields and the meta root links.
struct StripGraph;

impl GraphTransformer for StripGraph {
    fn transform_graph(&mut self, graph: Graph) -> Graph {
        let (root, nodes, data_types) = graph.into_parts();
        let nodes: Vec<Node> = nodes
            .into_iter()
            .filter(|n| !n.name.starts_with("__"))
            .collect();
        fold_graph(self, Graph::with_data_types(root, nodes, data_types))
    }

    fn transform_node(&mut self, mut node: Node) -> Node {
        node.members.retain(|m| m.name() != TYPENAME_FIELD);
        fold_node(self, node)
    }

    fn transform_root(&mut self, mut root: Root) -> Root {
        root.members.retain(|m| !is_hidden_root_member(m.name()));
        fold_root(self, root)
    }
}

fn is_hidden_root_member(name: &str) -> bool {
    HIDDEN_ROOT_MEMBERS.contains(&name) || name.starts_with("__")
}

pub struct Printer {
    config: Config,
    output: String,
}

impl Printer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    pub fn print(mut self, graph: &Graph) -> Result<String, SdlError> {
        let graph = StripGraph.transform_graph(graph.clone());

        self.output.push_str("scalar Any\n");
        for (name, ty) in graph.data_types() {
            let Some(fields) = ty.as_record() else {
                continue;
            };
            self.output.push_str(&format!("\ntype {name} {{\n"));
            for (field, field_ty) in fields {
                let Some(encoded) = encode_type(field_ty) else {
                    return Err(unsupported(name, field, field_ty));
                };
                self.line(1, &format!("{field}: {encoded}"));
            }
            self.output.push_str("}\n");
        }
        for node in graph.nodes() {
            let directives = directives(&node.directives);
            self.output
                .push_str(&format!("\ntype {}{directives} {{\n", node.name));
            self.members(&node.name, &node.members)?;
            self.output.push_str("}\n");
        }
        if !graph.root().members.is_empty() {
            self.output
                .push_str(&format!("\nextend type {QUERY_ROOT_NAME} {{\n"));
            self.members(QUERY_ROOT_NAME, &graph.root().members)?;
            self.output.push_str("}\n");
        }
        Ok(self.output)
    }

    fn line(&mut self, level: usize, text: &str) {
        self.output.push_str(&" ".repeat(level * self.config.indent));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn members(&mut self, owner: &str, members: &[Member]) -> Result<(), SdlError> {
        for member in members {
            let name = member.name();
            let ty = member.ty();
            let Some(encoded) = encode_type(&ty) else {
                return Err(unsupported(owner, name, &ty));
            };
            let directives = directives(member.directives());
            let options = member.options();
            if options.is_empty() {
                self.line(1, &format!("{name}: {encoded}{directives}"));
                continue;
            }

            let mut args = Vec::with_capacity(options.len());
            for option in options {
                let Some(arg) = encode_option(option) else {
                    return Err(unsupported(owner, &option.name, &option.ty));
                };
                args.push(arg);
            }
            if options.iter().all(|o| o.description.is_none()) {
                let signature = format!("{name}({}): {encoded}{directives}", args.join(", "));
                self.line(1, &signature);
                continue;
            }
            self.line(1, &format!("{name}("));
            for (option, arg) in options.iter().zip(&args) {
                if let Some(description) = &option.description {
                    self.line(2, &string_literal(description));
                }
                self.line(2, arg);
            }
            self.line(1, &format!("): {encoded}{directives}"));
        }
        Ok(())
    }
}

fn unsupported(owner: &str, name: &str, ty: &Type) -> SdlError {
    SdlError::UnsupportedType {
        owner: owner.to_owned(),
        name: name.to_owned(),
        ty: ty.clone(),
    }
}

/// Named types print non-null unless wrapped in `Optional`.
fn encode_type(ty: &Type) -> Option<String> {
    match ty {
        Type::Optional(inner) => {
            let encoded = encode_type(inner)?;
            Some(encoded.strip_suffix('!').unwrap_or(&encoded).to_owned())
        }
        Type::Sequence(item) => Some(format!("[{}]!", encode_type(item)?)),
        Type::TypeRef(name) => Some(format!("{name}!")),
        Type::Integer => Some("Int!".to_owned()),
        Type::String => Some("String!".to_owned()),
        Type::Boolean => Some("Boolean!".to_owned()),
        Type::Float => Some("Float!".to_owned()),
        Type::Any => Some("Any!".to_owned()),
        Type::Mapping(..) | Type::Record(_) | Type::Callable(_) => None,
    }
}

fn encode_option(option: &OptionDef) -> Option<String> {
    let ty = encode_type(&option.ty)?;
    Some(match &option.default {
        Some(value) => format!("{}: {ty} = {}", option.name, encode_value(value)),
        None => format!("{}: {ty}", option.name),
    })
}

/// GraphQL literal for a default value.
fn encode_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(encode_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{key}: {}", encode_value(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        Value::Ident(ident) => string_literal(&ident.to_string()),
    }
}

fn string_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

fn directives(directives: &[Directive]) -> String {
    directives
        .iter()
        .map(|directive| match directive {
            Directive::Deprecated(deprecated) => match &deprecated.reason {
                Some(reason) => format!(" @deprecated(reason: {})", string_literal(reason)),
                None => " @deprecated".to_owned(),
            },
        })
        .collect()
}
