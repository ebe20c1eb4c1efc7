//! Type visitors.
//!
//! Two flavors:
//! - `TypeVisitor`: one method per variant, each returning `Output`.
//!   Dispatch is an exhaustive match in [`Type::accept`], so adding a
//!   variant breaks every visitor until it is handled.
//! - `TypeWalker`: structural traversal with default recursion. Override
//!   `visit_*` methods and call the matching `walk_*` to keep descending.
//!
//! ```ignore
//! impl TypeWalker for MyPass {
//!     fn visit_type_ref(&mut self, name: &str) {
//!         self.names.push(name.to_owned());
//!     }
//! }
//! ```

use indexmap::IndexSet;

use crate::types::{Fields, Type, TypeKind};

pub trait TypeVisitor: Sized {
    type Output;

    fn visit(&mut self, ty: &Type) -> Self::Output {
        ty.accept(self)
    }

    fn visit_any(&mut self) -> Self::Output;
    fn visit_boolean(&mut self) -> Self::Output;
    fn visit_string(&mut self) -> Self::Output;
    fn visit_integer(&mut self) -> Self::Output;
    fn visit_float(&mut self) -> Self::Output;
    fn visit_optional(&mut self, inner: &Type) -> Self::Output;
    fn visit_sequence(&mut self, item: &Type) -> Self::Output;
    fn visit_mapping(&mut self, key: &Type, value: &Type) -> Self::Output;
    fn visit_record(&mut self, fields: &Fields) -> Self::Output;
    fn visit_callable(&mut self, args: &[Type]) -> Self::Output;
    fn visit_type_ref(&mut self, name: &str) -> Self::Output;
}

impl Type {
    pub fn accept<V: TypeVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Type::Any => visitor.visit_any(),
            Type::Boolean => visitor.visit_boolean(),
            Type::String => visitor.visit_string(),
            Type::Integer => visitor.visit_integer(),
            Type::Float => visitor.visit_float(),
            Type::Optional(inner) => visitor.visit_optional(inner),
            Type::Sequence(item) => visitor.visit_sequence(item),
            Type::Mapping(key, value) => visitor.visit_mapping(key, value),
            Type::Record(fields) => visitor.visit_record(fields),
            Type::Callable(args) => visitor.visit_callable(args),
            Type::TypeRef(name) => visitor.visit_type_ref(name),
        }
    }

    pub fn walk<W: TypeWalker>(&self, walker: &mut W) {
        walker.visit_type(self);
    }
}

pub trait TypeWalker: Sized {
    fn visit_type(&mut self, ty: &Type) {
        walk_type(self, ty);
    }

    fn visit_leaf(&mut self, _kind: TypeKind) {
        // Any and scalars
    }

    fn visit_optional(&mut self, inner: &Type) {
        self.visit_type(inner);
    }

    fn visit_sequence(&mut self, item: &Type) {
        self.visit_type(item);
    }

    fn visit_mapping(&mut self, key: &Type, value: &Type) {
        walk_mapping(self, key, value);
    }

    fn visit_record(&mut self, fields: &Fields) {
        walk_record(self, fields);
    }

    fn visit_callable(&mut self, args: &[Type]) {
        walk_callable(self, args);
    }

    fn visit_type_ref(&mut self, _name: &str) {
        // Leaf: resolution goes through the registry, not the walker
    }
}

pub fn walk_type<W: TypeWalker>(walker: &mut W, ty: &Type) {
    match ty {
        Type::Any | Type::Boolean | Type::String | Type::Integer | Type::Float => {
            walker.visit_leaf(ty.kind())
        }
        Type::Optional(inner) => walker.visit_optional(inner),
        Type::Sequence(item) => walker.visit_sequence(item),
        Type::Mapping(key, value) => walker.visit_mapping(key, value),
        Type::Record(fields) => walker.visit_record(fields),
        Type::Callable(args) => walker.visit_callable(args),
        Type::TypeRef(name) => walker.visit_type_ref(name),
    }
}

pub fn walk_mapping<W: TypeWalker>(walker: &mut W, key: &Type, value: &Type) {
    walker.visit_type(key);
    walker.visit_type(value);
}

pub fn walk_record<W: TypeWalker>(walker: &mut W, fields: &Fields) {
    for ty in fields.values() {
        walker.visit_type(ty);
    }
}

pub fn walk_callable<W: TypeWalker>(walker: &mut W, args: &[Type]) {
    for arg in args {
        walker.visit_type(arg);
    }
}

#[derive(Default)]
struct RefCollector {
    names: IndexSet<String>,
}

impl TypeWalker for RefCollector {
    fn visit_type_ref(&mut self, name: &str) {
        self.names.insert(name.to_owned());
    }
}

/// Names referenced by `TypeRef`s anywhere inside `ty`, deduplicated, in
/// first-seen order.
pub fn type_refs(ty: &Type) -> IndexSet<String> {
    let mut collector = RefCollector::default();
    ty.walk(&mut collector);
    collector.names
}
