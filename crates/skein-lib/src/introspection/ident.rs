//! Identity objects for meta-schema entities.
//!
//! Every `__Type`, `__Field`, `__InputValue` and `__Directive` row is keyed
//! by one of these. Equal identities denote the same entity, so they are
//! usable as ids across resolver batches.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ident {
    /// Named scalar (`Int`, `String`, `Any`, ...).
    Scalar(String),
    /// Node, root or data type exposed as an output object.
    Object(String),
    /// Data type exposed as an input object. Holds the data type name,
    /// the exposed name carries the `IO` prefix.
    InputObject(String),
    NonNull(Box<Ident>),
    List(Box<Ident>),
    Directive(String),
    /// Member `name` of node (or root, or data type) `node`.
    Field { node: String, name: String },
    /// Option `name` of member `field` on `node`.
    FieldArg {
        node: String,
        field: String,
        name: String,
    },
    /// Field `key` of the input object built from data type `ty`.
    InputObjectField { ty: String, key: String },
    DirectiveArg { directive: String, arg: String },
}

/// Prefix distinguishing input objects derived from data types.
pub const INPUT_OBJECT_PREFIX: &str = "IO";

impl Ident {
    pub fn scalar(name: impl Into<String>) -> Self {
        Ident::Scalar(name.into())
    }

    pub fn object(name: impl Into<String>) -> Self {
        Ident::Object(name.into())
    }

    pub fn input_object(name: impl Into<String>) -> Self {
        Ident::InputObject(name.into())
    }

    pub fn non_null(inner: Ident) -> Self {
        Ident::NonNull(Box::new(inner))
    }

    pub fn list(inner: Ident) -> Self {
        Ident::List(Box::new(inner))
    }

    /// GraphQL `__TypeKind` of a type identity, `None` for non-type entities.
    pub fn type_kind(&self) -> Option<&'static str> {
        Some(match self {
            Ident::Scalar(_) => "SCALAR",
            Ident::Object(_) => "OBJECT",
            Ident::InputObject(_) => "INPUT_OBJECT",
            Ident::NonNull(_) => "NON_NULL",
            Ident::List(_) => "LIST",
            _ => return None,
        })
    }

    /// Exposed name of a named type. Wrappers have no name.
    pub fn type_name(&self) -> Option<String> {
        match self {
            Ident::Scalar(name) | Ident::Object(name) => Some(name.clone()),
            Ident::InputObject(name) => Some(format!("{INPUT_OBJECT_PREFIX}{name}")),
            _ => None,
        }
    }

    /// Wrapped type of `NON_NULL` and `LIST`.
    pub fn of_type(&self) -> Option<&Ident> {
        match self {
            Ident::NonNull(inner) | Ident::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Drop one outer `NON_NULL`, if present.
    pub fn nullable(self) -> Ident {
        match self {
            Ident::NonNull(inner) => *inner,
            other => other,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Scalar(name) => write!(f, "SCALAR({name})"),
            Ident::Object(name) => write!(f, "OBJECT({name})"),
            Ident::InputObject(name) => write!(f, "INPUT_OBJECT({INPUT_OBJECT_PREFIX}{name})"),
            Ident::NonNull(inner) => write!(f, "NON_NULL({inner})"),
            Ident::List(inner) => write!(f, "LIST({inner})"),
            Ident::Directive(name) => write!(f, "@{name}"),
            Ident::Field { node, name } => write!(f, "{node}.{name}"),
            Ident::FieldArg { node, field, name } => write!(f, "{node}.{field}({name})"),
            Ident::InputObjectField { ty, key } => {
                write!(f, "{INPUT_OBJECT_PREFIX}{ty}.{key}")
            }
            Ident::DirectiveArg { directive, arg } => write!(f, "@{directive}({arg})"),
        }
    }
}
