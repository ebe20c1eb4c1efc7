//! Result projection.
//!
//! Engines return data normalized: one flat row per node instance, links
//! as references. [`Denormalize`] walks the query tree alongside the
//! graph's record types and rebuilds the nested shape the query asked
//! for, keyed by result keys (aliases), in query order.
//!
//! Data types are not normalized: a data-type field holds its whole value,
//! keyed by the record's own field names. Query links over such fields
//! read that value by field name and write under the result key.

use indexmap::IndexMap;
use skein_core::{Fields, Type, TypeError, Types};

use crate::Value;
use crate::graph::{Graph, LinkShape, ROOT_TYPE};
use crate::query::{QueryItem, QueryLink, QueryNode};

/// Read access to fetched data, positioned at one object.
pub trait ResultProxy: Sized {
    /// Plain value stored under `key`.
    fn value(&self, key: &str) -> Option<Value>;

    /// Nested object under `key`. `Some(None)` is an explicit null.
    fn object(&self, key: &str) -> Option<Option<Self>>;

    /// Nested objects under `key`.
    fn list(&self, key: &str) -> Option<Vec<Self>>;
}

impl<'a> ResultProxy for &'a Value {
    fn value(&self, key: &str) -> Option<Value> {
        (*self).get(key).cloned()
    }

    fn object(&self, key: &str) -> Option<Option<Self>> {
        match (*self).get(key)? {
            Value::Null => Some(None),
            value @ Value::Object(_) => Some(Some(value)),
            _ => None,
        }
    }

    fn list(&self, key: &str) -> Option<Vec<Self>> {
        (*self)
            .get(key)?
            .as_list()
            .map(|items| items.iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DenormalizeError {
    #[error("unexpected type of link \"{link}\": {ty}")]
    UnexpectedLinkType { link: String, ty: Type },

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("{0} is not a record type")]
    NotARecord(Type),

    #[error("\"{name}\" is not a member of {owner}")]
    UnknownMember { name: String, owner: String },

    #[error("result has no value for \"{0}\"")]
    MissingKey(String),

    #[error("\"{0}\" is null, but its type is not optional")]
    UnexpectedNull(String),

    #[error("value of \"{0}\" does not match its type")]
    Mismatch(String),
}

/// Cardinality of a link and the type it points at.
fn link_target(ty: &Type) -> Option<(LinkShape, &Type)> {
    match ty {
        Type::TypeRef(_) => Some((LinkShape::One, ty)),
        Type::Optional(inner) if inner.as_type_ref().is_some() => {
            Some((LinkShape::Maybe, &**inner))
        }
        Type::Sequence(item) if item.as_type_ref().is_some() => Some((LinkShape::Many, &**item)),
        _ => None,
    }
}

fn owner_name(ty: &Type) -> String {
    ty.as_type_ref()
        .map_or_else(|| ty.to_string(), str::to_owned)
}

/// Projector over one result. Consumed by [`Denormalize::process`].
pub struct Denormalize<'g, P> {
    types: &'g Types,
    data_types: &'g IndexMap<String, Type>,
    proxy: P,
}

impl<'g, P: ResultProxy> Denormalize<'g, P> {
    pub fn new(graph: &'g Graph, proxy: P) -> Self {
        Self {
            types: graph.types(),
            data_types: graph.data_types(),
            proxy,
        }
    }

    pub fn process(self, query: &QueryNode) -> Result<Value, DenormalizeError> {
        // every graph registers its root record
        let root = Type::type_ref(ROOT_TYPE);
        let fields = self
            .types
            .ensure_resolved(&root)
            .as_record()
            .ok_or_else(|| DenormalizeError::NotARecord(root.clone()))?;
        let mut out = IndexMap::new();
        self.visit_node(ROOT_TYPE, fields, &self.proxy, query, &mut out)?;
        Ok(Value::Object(out))
    }

    fn record<'t>(&'t self, ty: &'t Type) -> Result<&'t Fields, DenormalizeError> {
        self.types
            .resolve(ty)?
            .as_record()
            .ok_or_else(|| DenormalizeError::NotARecord(ty.clone()))
    }

    fn is_data_type(&self, ty: &Type) -> bool {
        ty.as_type_ref()
            .is_some_and(|name| self.data_types.contains_key(name))
    }

    fn visit_node(
        &self,
        owner: &str,
        fields: &Fields,
        data: &P,
        query: &QueryNode,
        out: &mut IndexMap<String, Value>,
    ) -> Result<(), DenormalizeError> {
        for item in &query.items {
            match item {
                QueryItem::Field(field) => {
                    let key = field.result_key();
                    let value = data
                        .value(key)
                        .ok_or_else(|| DenormalizeError::MissingKey(key.to_owned()))?;
                    out.insert(key.to_owned(), value);
                }
                QueryItem::Link(link) => {
                    let ty = fields
                        .get(&link.name)
                        .ok_or_else(|| DenormalizeError::UnknownMember {
                            name: link.name.clone(),
                            owner: owner.to_owned(),
                        })?;
                    let value = self.visit_link(ty, data, link)?;
                    out.insert(link.result_key().to_owned(), value);
                }
            }
        }
        Ok(())
    }

    fn visit_link(&self, ty: &Type, data: &P, link: &QueryLink) -> Result<Value, DenormalizeError> {
        let key = link.result_key();
        let missing = || DenormalizeError::MissingKey(key.to_owned());
        let Some((shape, target)) = link_target(ty) else {
            return Err(DenormalizeError::UnexpectedLinkType {
                link: link.name.clone(),
                ty: ty.clone(),
            });
        };
        if self.is_data_type(target) {
            let value = data.value(key).ok_or_else(missing)?;
            return self.visit_embedded_link(shape, target, &value, link);
        }
        match shape {
            LinkShape::One => match data.object(key).ok_or_else(missing)? {
                Some(child) => self.visit_object(target, &child, link),
                None => Err(DenormalizeError::UnexpectedNull(key.to_owned())),
            },
            LinkShape::Maybe => match data.object(key).ok_or_else(missing)? {
                Some(child) => self.visit_object(target, &child, link),
                None => Ok(Value::Null),
            },
            LinkShape::Many => {
                let items = data.list(key).ok_or_else(missing)?;
                let values = items
                    .iter()
                    .map(|child| self.visit_object(target, child, link))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(values))
            }
        }
    }

    fn visit_object(
        &self,
        target: &Type,
        data: &P,
        link: &QueryLink,
    ) -> Result<Value, DenormalizeError> {
        let fields = self.record(target)?;
        let mut out = IndexMap::new();
        self.visit_node(&owner_name(target), fields, data, &link.node, &mut out)?;
        Ok(Value::Object(out))
    }

    fn visit_embedded_link(
        &self,
        shape: LinkShape,
        target: &Type,
        value: &Value,
        link: &QueryLink,
    ) -> Result<Value, DenormalizeError> {
        let key = link.result_key();
        match (shape, value) {
            (LinkShape::One, Value::Null) => Err(DenormalizeError::UnexpectedNull(key.to_owned())),
            (LinkShape::Maybe, Value::Null) => Ok(Value::Null),
            (LinkShape::One | LinkShape::Maybe, value) => self.visit_embedded(target, value, link),
            (LinkShape::Many, Value::List(items)) => items
                .iter()
                .map(|item| self.visit_embedded(target, item, link))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            (LinkShape::Many, _) => Err(DenormalizeError::Mismatch(key.to_owned())),
        }
    }

    /// Embedded values are keyed by field name; output by result key.
    fn visit_embedded(
        &self,
        target: &Type,
        value: &Value,
        link: &QueryLink,
    ) -> Result<Value, DenormalizeError> {
        let fields = self.record(target)?;
        let Value::Object(data) = value else {
            return Err(DenormalizeError::Mismatch(link.result_key().to_owned()));
        };
        let mut out = IndexMap::new();
        for item in &link.node.items {
            let name = item.name();
            let ty = fields
                .get(name)
                .ok_or_else(|| DenormalizeError::UnknownMember {
                    name: name.to_owned(),
                    owner: owner_name(target),
                })?;
            let stored = data
                .get(name)
                .ok_or_else(|| DenormalizeError::MissingKey(name.to_owned()))?;
            let projected = match item {
                QueryItem::Field(_) => stored.clone(),
                QueryItem::Link(nested) => {
                    let Some((shape, nested_target)) = link_target(ty) else {
                        return Err(DenormalizeError::UnexpectedLinkType {
                            link: nested.name.clone(),
                            ty: ty.clone(),
                        });
                    };
                    self.visit_embedded_link(shape, nested_target, stored, nested)?
                }
            };
            out.insert(item.result_key().to_owned(), projected);
        }
        Ok(Value::Object(out))
    }
}

/// Project `proxy` into the shape of `query`.
pub fn denormalize<P: ResultProxy>(
    graph: &Graph,
    proxy: P,
    query: &QueryNode,
) -> Result<Value, DenormalizeError> {
    Denormalize::new(graph, proxy).process(query)
}
