//! skein: typed schema graphs.
//!
//! A graph declares nodes, fields and links with types from
//! [`skein_core`]. On top of it:
//! - [`denormalize`] reshapes fetched data into the shape of a query
//! - [`introspection`] exposes the graph through GraphQL introspection
//! - [`engine`] is a reference executor for query trees
//! - [`sdl`] prints the graph as GraphQL schema text
//!
//! # Example
//!
//! ```
//! use skein_lib::graph::{Field, FieldResolver, Graph, Root};
//! use skein_lib::introspection::introspect;
//! use skein_lib::query::{field, link, node};
//! use skein_lib::{Engine, Value, denormalize};
//! use skein_core::Type;
//!
//! let answer = FieldResolver::new(|fields, ids| {
//!     Ok(ids.iter().map(|_| vec![Value::Int(42); fields.len()]).collect())
//! });
//! let graph = Graph::new(Root::new([Field::new("answer", Type::Integer, answer).into()]), []);
//! let graph = introspect(graph).expect("valid graph");
//!
//! let query = node([
//!     field("answer"),
//!     link("__type", [field("name")]).option("name", "Query"),
//! ]);
//! let store = Engine::new().execute(&graph, &query).expect("executed");
//! let result = denormalize(&graph, store.proxy(), &query).expect("projected");
//! assert_eq!(result.get("answer"), Some(&Value::Int(42)));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod denormalize;
pub mod engine;
pub mod graph;
pub mod introspection;
pub mod query;
pub mod sdl;
pub mod value;

#[cfg(test)]
mod denormalize_tests;
#[cfg(test)]
mod query_tests;
#[cfg(test)]
mod sdl_tests;
#[cfg(test)]
mod value_tests;

pub use denormalize::{Denormalize, DenormalizeError, ResultProxy, denormalize};
pub use engine::{Engine, ExecuteError, Store};
pub use graph::{GraphErrors, ResolveError};
pub use sdl::{SdlError, print_sdl};
pub use value::Value;

/// Errors of every stage, for callers that chain them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Type(#[from] skein_core::TypeError),

    #[error(transparent)]
    Graph(#[from] GraphErrors),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Denormalize(#[from] DenormalizeError),

    #[error(transparent)]
    Sdl(#[from] SdlError),
}

pub type Result<T> = std::result::Result<T, Error>;
