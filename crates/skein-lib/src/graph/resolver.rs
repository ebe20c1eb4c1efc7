//! Resolver callables.
//!
//! Resolvers are batched: a field resolver receives every requested field
//! it owns together with every id of the level, a link resolver receives
//! every id at once. Both come in a blocking and an asynchronous flavor;
//! the executor awaits either.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use indexmap::IndexMap;

use crate::Value;

/// Option values by name, defaults already applied.
pub type Options = IndexMap<String, Value>;

/// One row per id, one value per requested field within a row.
pub type FieldOutput = Result<Vec<Vec<Value>>, ResolveError>;

/// One value per id: a target id, `Null`, or a list of target ids.
pub type LinkOutput = Result<Vec<Value>, ResolveError>;

type SyncFieldFn = dyn Fn(&[FieldRequest], &[Value]) -> FieldOutput + Send + Sync;
type AsyncFieldFn =
    dyn Fn(&[FieldRequest], &[Value]) -> BoxFuture<'static, FieldOutput> + Send + Sync;
type SyncLinkFn = dyn Fn(&[Value], &Options) -> LinkOutput + Send + Sync;
type AsyncLinkFn = dyn Fn(&[Value], &Options) -> BoxFuture<'static, LinkOutput> + Send + Sync;

/// A field as seen by its resolver.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRequest {
    pub name: String,
    pub options: Options,
}

impl FieldRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::new(),
        }
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Id of an unexpected shape for this resolver.
    #[error("unexpected id: {0}")]
    UnexpectedId(String),

    /// Type that has no GraphQL counterpart.
    #[error("not expected here: {0}")]
    Unsupported(String),

    #[error(
        "object type \"{0}\" does not contain fields, which is not acceptable for GraphQL in order to define schema type"
    )]
    NoExposedFields(String),

    #[error("{0}")]
    Custom(String),
}

impl ResolveError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

#[derive(Clone)]
pub enum FieldResolver {
    Sync(Arc<SyncFieldFn>),
    Async(Arc<AsyncFieldFn>),
}

impl FieldResolver {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[FieldRequest], &[Value]) -> FieldOutput + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    pub fn new_async<F>(f: F) -> Self
    where
        F: Fn(&[FieldRequest], &[Value]) -> BoxFuture<'static, FieldOutput> + Send + Sync + 'static,
    {
        Self::Async(Arc::new(f))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    /// Address of the shared callable. Clones of one resolver share it,
    /// which is what groups fields into one batch.
    pub fn id(&self) -> usize {
        match self {
            Self::Sync(f) => Arc::as_ptr(f) as *const () as usize,
            Self::Async(f) => Arc::as_ptr(f) as *const () as usize,
        }
    }

    pub fn same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Wrap a blocking resolver so it returns an immediately ready future.
    pub fn into_async(self) -> Self {
        match self {
            Self::Sync(f) => Self::Async(Arc::new(
                move |fields: &[FieldRequest], ids: &[Value]| -> BoxFuture<'static, FieldOutput> {
                    future::ready(f(fields, ids)).boxed()
                },
            )),
            other => other,
        }
    }

    pub async fn call(&self, fields: &[FieldRequest], ids: &[Value]) -> FieldOutput {
        match self {
            Self::Sync(f) => f(fields, ids),
            Self::Async(f) => f(fields, ids).await,
        }
    }
}

impl fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flavor = if self.is_async() { "async" } else { "sync" };
        write!(f, "FieldResolver({flavor}@{:#x})", self.id())
    }
}

#[derive(Clone)]
pub enum LinkResolver {
    Sync(Arc<SyncLinkFn>),
    Async(Arc<AsyncLinkFn>),
}

impl LinkResolver {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value], &Options) -> LinkOutput + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    pub fn new_async<F>(f: F) -> Self
    where
        F: Fn(&[Value], &Options) -> BoxFuture<'static, LinkOutput> + Send + Sync + 'static,
    {
        Self::Async(Arc::new(f))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    pub fn id(&self) -> usize {
        match self {
            Self::Sync(f) => Arc::as_ptr(f) as *const () as usize,
            Self::Async(f) => Arc::as_ptr(f) as *const () as usize,
        }
    }

    pub fn into_async(self) -> Self {
        match self {
            Self::Sync(f) => Self::Async(Arc::new(
                move |ids: &[Value], options: &Options| -> BoxFuture<'static, LinkOutput> {
                    future::ready(f(ids, options)).boxed()
                },
            )),
            other => other,
        }
    }

    pub async fn call(&self, ids: &[Value], options: &Options) -> LinkOutput {
        match self {
            Self::Sync(f) => f(ids, options),
            Self::Async(f) => f(ids, options).await,
        }
    }
}

impl fmt::Debug for LinkResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flavor = if self.is_async() { "async" } else { "sync" };
        write!(f, "LinkResolver({flavor}@{:#x})", self.id())
    }
}
