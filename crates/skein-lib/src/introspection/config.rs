//! Introspection configuration.

use super::directives::{DirectiveDef, builtin_directives};

#[derive(Clone, Debug)]
pub struct IntrospectionConfig {
    /// Directives listed by `__schema.directives`
    pub(crate) directives: Vec<DirectiveDef>,
    /// Rewrap every resolver into an asynchronous one
    pub(crate) asynchronous: bool,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            directives: builtin_directives(),
            asynchronous: false,
        }
    }
}

impl IntrospectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the directive catalog.
    pub fn directives(mut self, directives: Vec<DirectiveDef>) -> Self {
        self.directives = directives;
        self
    }

    /// Add a directive after the current ones.
    pub fn directive(mut self, directive: DirectiveDef) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn asynchronous(mut self, value: bool) -> Self {
        self.asynchronous = value;
        self
    }
}
