//! Graph validation.
//!
//! Checks that a graph can be exposed through GraphQL: identifier syntax,
//! non-empty nodes, resolvable type references. Every violation is
//! collected before reporting, so one run lists all of them.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use skein_core::{Type, type_refs};

use super::visitor::{GraphVisitor, walk_member, walk_options};
use super::{Field, Graph, Link, Member, Node, OptionDef, ROOT_TYPE, Root};

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").expect("identifier pattern is valid")
});

/// Whether `name` is a valid GraphQL identifier.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Names starting with `_` are hidden from introspection.
pub fn is_exposed(name: &str) -> bool {
    !name.starts_with('_')
}

/// All configuration errors found in a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphErrors {
    pub errors: Vec<String>,
}

impl fmt::Display for GraphErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid GraphQL graph:")?;
        for error in &self.errors {
            write!(f, "\n- {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphErrors {}

/// Validate `graph`, aggregating every violation.
pub fn validate(graph: &Graph) -> Result<(), GraphErrors> {
    let mut validator = ValidateGraph::new(graph);
    validator.visit_graph(graph);
    log::debug!(
        "validated graph: {} node(s), {} data type(s), {} error(s)",
        graph.nodes().len(),
        graph.data_types().len(),
        validator.errors.len()
    );
    if validator.errors.is_empty() {
        Ok(())
    } else {
        Err(GraphErrors {
            errors: validator.errors,
        })
    }
}

fn no_exposed_fields(name: &str) -> String {
    format!(
        "Object type \"{name}\" does not contain fields, which is not acceptable for GraphQL in order to define schema type"
    )
}

struct ValidateGraph {
    path: Vec<String>,
    errors: Vec<String>,
    node_names: IndexSet<String>,
    data_type_names: IndexSet<String>,
}

impl ValidateGraph {
    fn new(graph: &Graph) -> Self {
        Self {
            path: Vec::new(),
            errors: Vec::new(),
            node_names: graph.nodes().iter().map(|n| n.name.clone()).collect(),
            data_type_names: graph.data_types().keys().cloned().collect(),
        }
    }

    fn add_error(&mut self, name: &str, message: impl fmt::Display) {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(name);
        self.errors.push(format!("{path}: {message}"));
    }

    fn check_name(&mut self, what: &str, name: &str) {
        if !is_valid_name(name) {
            self.add_error(name, format!("Invalid {what} name: {name}"));
        }
    }

    fn check_refs(&mut self, name: &str, ty: &Type) {
        for target in type_refs(ty) {
            if !self.node_names.contains(&target) && !self.data_type_names.contains(&target) {
                self.add_error(name, format!("Unknown type: {target}"));
            }
        }
    }

    fn check_members(&mut self, owner: &str, exposed_as: &str, members: &[Member]) {
        if members.is_empty() {
            self.add_error(owner, format!("No fields in the {owner} node"));
            return;
        }
        if !members.iter().any(|m| is_exposed(m.name())) {
            self.add_error(owner, no_exposed_fields(exposed_as));
        }
        self.path.push(owner.to_owned());
        for member in members {
            self.visit_member(member);
        }
        self.path.pop();
    }
}

impl GraphVisitor for ValidateGraph {
    fn visit_data_type(&mut self, name: &str, ty: &Type) {
        self.check_name("data type", name);
        let Some(fields) = ty.as_record() else {
            self.add_error(name, format!("Data type must be a Record, got {ty}"));
            return;
        };
        if fields.is_empty() {
            self.add_error(name, no_exposed_fields(name));
        }
        self.path.push(name.to_owned());
        for (key, field_ty) in fields {
            self.check_name("field", key);
            self.check_refs(key, field_ty);
        }
        self.path.pop();
    }

    fn visit_node(&mut self, node: &Node) {
        self.check_name("node", &node.name);
        if node.name == ROOT_TYPE {
            self.add_error(&node.name, "Reserved node name");
        }
        self.check_members(&node.name, &node.name, &node.members);
    }

    fn visit_root(&mut self, root: &Root) {
        self.check_members("Root", "Query", &root.members);
    }

    fn visit_member(&mut self, member: &Member) {
        walk_member(self, member);
    }

    fn visit_field(&mut self, field: &Field) {
        self.check_name("field", &field.name);
        if let Some(ty) = &field.ty {
            self.check_refs(&field.name, ty);
        }
        walk_options(self, &field.options);
    }

    fn visit_link(&mut self, link: &Link) {
        self.check_name("link", &link.name);
        self.check_refs(&link.name, &link.ty);
        walk_options(self, &link.options);
    }

    fn visit_option(&mut self, option: &OptionDef) {
        self.check_name("option", &option.name);
        for target in type_refs(&option.ty) {
            if !self.data_type_names.contains(&target) {
                self.add_error(
                    &option.name,
                    format!("Option type must reference a data type: {target}"),
                );
            }
        }
    }
}
