//! GraphQL introspection.
//!
//! Compiles a schema graph into a meta-schema graph (`__Type`, `__Field`,
//! `__InputValue`, `__Directive`, `__EnumValue`, `__Schema`) whose
//! resolvers read a [`SchemaInfo`] snapshot, and merges it into the graph
//! so introspection queries run on the same engine as ordinary ones.
//!
//! Meta-schema rows are keyed by [`Ident`]s. Type identities are built by
//! [`TypeIdent`]:
//! - scalars are `NON_NULL(SCALAR)`, `Optional` strips one `NON_NULL`
//! - `Sequence` is `NON_NULL(LIST(item))`
//! - references are `NON_NULL(OBJECT)`, or `NON_NULL(INPUT_OBJECT)` for
//!   option types
//! - `Any`, mappings and inline records are the `Any` scalar

mod bind;
mod config;
pub mod directives;
mod ident;
mod meta;
pub mod resolvers;
mod schema;

#[cfg(test)]
mod resolvers_tests;

pub use bind::{GraphQLIntrospection, MakeAsync, TYPENAME_FIELD, introspect, typename_field};
pub use config::IntrospectionConfig;
pub use directives::{DirectiveArg, DirectiveDef, builtin_directives};
pub use ident::{INPUT_OBJECT_PREFIX, Ident};
pub use meta::introspection_graph;
pub use schema::{MUTATION_ROOT_NAME, NodeView, QUERY_ROOT_NAME, SCALARS, SchemaInfo, TypeIdent};
