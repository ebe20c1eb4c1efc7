//! Named type registry.
//!
//! `TypeRef`s are deferred by name so schemas can be recursive or mutually
//! referential; this registry is what they resolve against.

use indexmap::IndexMap;

use crate::{Type, TypeError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Types {
    types: IndexMap<String, Type>,
}

impl Types {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty` under `name`, returning the type it replaced.
    pub fn insert(&mut self, name: impl Into<String>, ty: Type) -> Option<Type> {
        self.types.insert(name.into(), ty)
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// Identity for non-refs; registry lookup for `TypeRef(name)`.
    pub fn resolve<'a>(&'a self, ty: &'a Type) -> Result<&'a Type, TypeError> {
        match ty {
            Type::TypeRef(name) => self
                .types
                .get(name)
                .ok_or_else(|| TypeError::UnknownType(name.clone())),
            _ => Ok(ty),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Type)> for Types {
    fn from_iter<I: IntoIterator<Item = (K, Type)>>(iter: I) -> Self {
        Self {
            types: iter
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        }
    }
}
