//! Query trees.
//!
//! A query is a tree of requested fields and links, each optionally
//! aliased and parameterized. There is no parser; trees are built with
//! [`node`], [`field`] and [`link`].
//!
//! ```ignore
//! let query = node([
//!     field("name"),
//!     link("friends", [field("name").alias("friend")]),
//! ]);
//! ```

use crate::Value;
use crate::graph::Options;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryNode {
    pub items: Vec<QueryItem>,
}

impl QueryNode {
    pub fn new(items: impl IntoIterator<Item = QueryItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QueryItem {
    Field(QueryField),
    Link(QueryLink),
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryField {
    pub name: String,
    pub alias: Option<String>,
    pub options: Options,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryLink {
    pub name: String,
    pub alias: Option<String>,
    pub options: Options,
    pub node: QueryNode,
}

impl QueryField {
    /// Key the value is stored under: the alias when present, else the name.
    pub fn result_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl QueryLink {
    pub fn result_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl QueryItem {
    pub fn name(&self) -> &str {
        match self {
            QueryItem::Field(f) => &f.name,
            QueryItem::Link(l) => &l.name,
        }
    }

    pub fn result_key(&self) -> &str {
        match self {
            QueryItem::Field(f) => f.result_key(),
            QueryItem::Link(l) => l.result_key(),
        }
    }

    pub fn options(&self) -> &Options {
        match self {
            QueryItem::Field(f) => &f.options,
            QueryItem::Link(l) => &l.options,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let slot = match &mut self {
            QueryItem::Field(f) => &mut f.alias,
            QueryItem::Link(l) => &mut l.alias,
        };
        *slot = Some(alias.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let options = match &mut self {
            QueryItem::Field(f) => &mut f.options,
            QueryItem::Link(l) => &mut l.options,
        };
        options.insert(name.into(), value.into());
        self
    }
}

pub fn node(items: impl IntoIterator<Item = QueryItem>) -> QueryNode {
    QueryNode::new(items)
}

pub fn field(name: impl Into<String>) -> QueryItem {
    QueryItem::Field(QueryField {
        name: name.into(),
        alias: None,
        options: Options::new(),
    })
}

pub fn link(name: impl Into<String>, items: impl IntoIterator<Item = QueryItem>) -> QueryItem {
    QueryItem::Link(QueryLink {
        name: name.into(),
        alias: None,
        options: Options::new(),
        node: QueryNode::new(items),
    })
}
