//! Reference query executor.
//!
//! Runs a query tree against a graph level by level. At each level the
//! requested fields are grouped by resolver and fetched with one call per
//! group for all ids of the level; each requested link is resolved once
//! for all parent rows, and the ids it yields form the next level.

mod store;

#[cfg(test)]
mod store_tests;

pub use store::{RowId, Slot, Store, StoreProxy};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::Value;
use crate::graph::{
    Field, FieldRequest, FieldResolver, Graph, Link, LinkShape, Member, OptionDef, Options,
    ResolveError,
};
use crate::query::{QueryItem, QueryNode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error("{node}.{name}: {source}")]
    Resolve {
        node: String,
        name: String,
        source: ResolveError,
    },

    #[error("{node}.{name}: no such field or link")]
    UnknownMember { node: String, name: String },

    #[error("{node}.{name}: missing option \"{option}\"")]
    MissingOption {
        node: String,
        name: String,
        option: String,
    },

    #[error("{node}.{name}: expected {expected} result(s), got {found}")]
    ResultCount {
        node: String,
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{node}.{name}: expected a list of ids, got {value:?}")]
    ExpectedList {
        node: String,
        name: String,
        value: Value,
    },

    #[error("{node}.{name}: link type must be a node reference")]
    InvalidLinkType { node: String, name: String },

    #[error("unknown node: {0}")]
    UnknownNode(String),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Execute, blocking the current thread until every resolver is done.
    pub fn execute(&self, graph: &Graph, query: &QueryNode) -> Result<Store, ExecuteError> {
        futures::executor::block_on(self.execute_async(graph, query))
    }

    pub async fn execute_async(
        &self,
        graph: &Graph,
        query: &QueryNode,
    ) -> Result<Store, ExecuteError> {
        let mut store = Store::new();
        let level = Level {
            graph,
            node: "Root",
            members: &graph.root().members,
            query,
        };
        level
            .process(vec![Value::Null], vec![RowId::ROOT], &mut store)
            .await?;
        Ok(store)
    }
}

/// Where a fetched field column goes.
enum Target<'q> {
    /// Requested by the query, stored under this key.
    Key(&'q str),
    /// Needed as input ids of a link.
    Requires,
}

struct Request<'a, 'q> {
    field: &'a Field,
    request: FieldRequest,
    target: Target<'q>,
}

struct Level<'a> {
    graph: &'a Graph,
    node: &'a str,
    members: &'a [Member],
    query: &'a QueryNode,
}

impl<'a> Level<'a> {
    fn process<'s>(
        self,
        ids: Vec<Value>,
        rows: Vec<RowId>,
        store: &'s mut Store,
    ) -> BoxFuture<'s, Result<(), ExecuteError>>
    where
        'a: 's,
    {
        async move {
            let requests = self.field_requests()?;
            let columns = self.fetch_fields(&requests, &ids).await?;
            let mut required: Vec<(&str, &[Value])> = Vec::new();
            for (req, column) in requests.iter().zip(&columns) {
                match req.target {
                    Target::Key(key) => {
                        for (row, value) in rows.iter().zip(column) {
                            store.set(*row, key, Slot::Value(value.clone()));
                        }
                    }
                    Target::Requires => {
                        required.push((req.request.name.as_str(), column.as_slice()))
                    }
                }
            }

            for item in &self.query.items {
                let QueryItem::Link(query_link) = item else {
                    continue;
                };
                let Some(Member::Link(link)) = self.member(&query_link.name) else {
                    continue;
                };
                let link_ids = match &link.requires {
                    Some(name) => required
                        .iter()
                        .find(|(n, _)| *n == name.as_str())
                        .map(|(_, column)| column.to_vec())
                        .unwrap_or_default(),
                    None => vec![Value::Null; ids.len()],
                };
                let options = self.options(&link.name, &link.options, &query_link.options)?;
                let key = query_link.result_key();
                let (child_ids, child_rows) = self
                    .resolve_link(link, key, &link_ids, &options, &rows, store)
                    .await?;
                if child_ids.is_empty() {
                    continue;
                }
                let Some((_, target)) = link.shape() else {
                    continue;
                };
                let node = self
                    .graph
                    .node(target)
                    .ok_or_else(|| ExecuteError::UnknownNode(target.to_owned()))?;
                let level = Level {
                    graph: self.graph,
                    node: &node.name,
                    members: &node.members,
                    query: &query_link.node,
                };
                level.process(child_ids, child_rows, &mut *store).await?;
            }
            Ok(())
        }
        .boxed()
    }

    fn member(&self, name: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.name() == name)
    }

    fn options(
        &self,
        name: &str,
        defs: &[OptionDef],
        given: &Options,
    ) -> Result<Options, ExecuteError> {
        let mut options = Options::new();
        for def in defs {
            let value = given
                .get(&def.name)
                .or(def.default.as_ref())
                .ok_or_else(|| ExecuteError::MissingOption {
                    node: self.node.to_owned(),
                    name: name.to_owned(),
                    option: def.name.clone(),
                })?;
            options.insert(def.name.clone(), value.clone());
        }
        Ok(options)
    }

    /// Fields to fetch at this level: query fields, fields queried as
    /// links (embedded data types), and `requires` inputs of links.
    fn field_requests(&self) -> Result<Vec<Request<'a, 'a>>, ExecuteError> {
        let mut requests = Vec::new();
        for item in &self.query.items {
            let member = self
                .member(item.name())
                .ok_or_else(|| ExecuteError::UnknownMember {
                    node: self.node.to_owned(),
                    name: item.name().to_owned(),
                })?;
            match member {
                Member::Field(field) => {
                    let request = FieldRequest {
                        name: field.name.clone(),
                        options: self.options(&field.name, &field.options, item.options())?,
                    };
                    requests.push(Request {
                        field,
                        request,
                        target: Target::Key(item.result_key()),
                    });
                }
                Member::Link(link) => {
                    let Some(required) = &link.requires else {
                        continue;
                    };
                    let already = requests.iter().any(|r| {
                        matches!(r.target, Target::Requires) && r.request.name == *required
                    });
                    if already {
                        continue;
                    }
                    let Some(Member::Field(field)) = self.member(required) else {
                        return Err(ExecuteError::UnknownMember {
                            node: self.node.to_owned(),
                            name: required.clone(),
                        });
                    };
                    let request = FieldRequest {
                        name: field.name.clone(),
                        options: self.options(&field.name, &field.options, &Options::new())?,
                    };
                    requests.push(Request {
                        field,
                        request,
                        target: Target::Requires,
                    });
                }
            }
        }
        Ok(requests)
    }

    /// One resolver call per group of fields sharing a resolver. Returns
    /// one column (a value per id) per request.
    async fn fetch_fields(
        &self,
        requests: &[Request<'a, 'a>],
        ids: &[Value],
    ) -> Result<Vec<Vec<Value>>, ExecuteError> {
        let mut groups: Vec<(&FieldResolver, Vec<usize>)> = Vec::new();
        for (index, req) in requests.iter().enumerate() {
            match groups.iter_mut().find(|(r, _)| r.same(&req.field.resolver)) {
                Some((_, members)) => members.push(index),
                None => groups.push((&req.field.resolver, vec![index])),
            }
        }

        let mut columns = vec![Vec::new(); requests.len()];
        for (resolver, indices) in groups {
            let fields: Vec<FieldRequest> = indices
                .iter()
                .map(|&i| requests[i].request.clone())
                .collect();
            let first = &requests[indices[0]].field.name;
            log::trace!(
                "{}: fetching {} field(s) for {} id(s) starting at {first}",
                self.node,
                fields.len(),
                ids.len()
            );
            let rows = resolver
                .call(&fields, ids)
                .await
                .map_err(|source| ExecuteError::Resolve {
                    node: self.node.to_owned(),
                    name: first.clone(),
                    source,
                })?;
            self.check_count(first, ids.len(), rows.len())?;
            for row in rows {
                self.check_count(first, fields.len(), row.len())?;
                for (&index, value) in indices.iter().zip(row) {
                    columns[index].push(value);
                }
            }
        }
        Ok(columns)
    }

    async fn resolve_link(
        &self,
        link: &Link,
        key: &str,
        ids: &[Value],
        options: &Options,
        rows: &[RowId],
        store: &mut Store,
    ) -> Result<(Vec<Value>, Vec<RowId>), ExecuteError> {
        let (shape, _) = link.shape().ok_or_else(|| ExecuteError::InvalidLinkType {
            node: self.node.to_owned(),
            name: link.name.clone(),
        })?;
        log::trace!(
            "{}: resolving link {} for {} id(s)",
            self.node,
            link.name,
            ids.len()
        );
        let values = link
            .resolver
            .call(ids, options)
            .await
            .map_err(|source| ExecuteError::Resolve {
                node: self.node.to_owned(),
                name: link.name.clone(),
                source,
            })?;
        self.check_count(&link.name, rows.len(), values.len())?;

        let mut child_ids = Vec::new();
        let mut child_rows = Vec::new();
        for (&row, value) in rows.iter().zip(values) {
            let slot = match (shape, value) {
                (LinkShape::Maybe, Value::Null) => Slot::Null,
                (LinkShape::One | LinkShape::Maybe, id) => {
                    let child = store.push_row();
                    child_ids.push(id);
                    child_rows.push(child);
                    Slot::Ref(child)
                }
                (LinkShape::Many, Value::List(items)) => {
                    let mut refs = Vec::with_capacity(items.len());
                    for id in items {
                        let child = store.push_row();
                        child_ids.push(id);
                        child_rows.push(child);
                        refs.push(child);
                    }
                    Slot::Refs(refs)
                }
                (LinkShape::Many, value) => {
                    return Err(ExecuteError::ExpectedList {
                        node: self.node.to_owned(),
                        name: link.name.clone(),
                        value,
                    });
                }
            };
            store.set(row, key, slot);
        }
        Ok((child_ids, child_rows))
    }

    fn check_count(&self, name: &str, expected: usize, found: usize) -> Result<(), ExecuteError> {
        if expected == found {
            return Ok(());
        }
        Err(ExecuteError::ResultCount {
            node: self.node.to_owned(),
            name: name.to_owned(),
            expected,
            found,
        })
    }
}
