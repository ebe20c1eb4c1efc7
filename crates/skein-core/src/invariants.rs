//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Type, Types};

impl Types {
    /// Resolve a type that validation already proved resolvable.
    pub fn ensure_resolved<'a>(&'a self, ty: &'a Type) -> &'a Type {
        self.resolve(ty).unwrap_or_else(|err| {
            panic!("Types: {err} (graph must be validated before resolution)")
        })
    }
}
