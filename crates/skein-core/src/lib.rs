#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Type algebra for skein schema graphs.
//!
//! Three layers:
//! - **Types**: the closed set of type constructors (`Type`, `TypeKind`)
//! - **Visitors**: `TypeVisitor` for analyses producing a value,
//!   `TypeWalker` for structural traversal
//! - **Registry**: `Types`, named record types that `TypeRef`s resolve against

mod invariants;
pub mod registry;
pub mod types;
pub mod visit;

#[cfg(test)]
mod registry_tests;

pub use registry::Types;
pub use types::{Fields, Type, TypeKind, TypeParam};
pub use visit::{TypeVisitor, TypeWalker, type_refs};

/// Errors raised while constructing or resolving types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Wrong number of parameters for a constructor.
    #[error("{kind} takes {expected} parameter(s), {found} given")]
    Arity {
        kind: TypeKind,
        expected: usize,
        found: usize,
    },

    /// Parameter of the wrong shape (e.g. field list where a type is expected).
    #[error("parameter {index} of {kind} must be {expected}")]
    Param {
        kind: TypeKind,
        index: usize,
        expected: &'static str,
    },

    /// `TypeRef` name missing from the registry.
    #[error("unknown type: {0}")]
    UnknownType(String),
}
