//! Type constructors.
//!
//! `Type` is a closed tagged union. Composite variants are parameterized
//! exactly once, at construction; there are no mutators, so a built type
//! is final. Equality and hashing are structural.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::TypeError;

/// Ordered record fields.
pub type Fields = IndexMap<String, Type>;

/// Type tag, without parameters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum TypeKind {
    Any = 0,
    Boolean = 1,
    String = 2,
    Integer = 3,
    Float = 4,
    /// `Optional[T]` - value or null.
    Optional = 5,
    /// `Sequence[T]` - ordered items.
    Sequence = 6,
    /// `Mapping[K, V]`.
    Mapping = 7,
    /// `Record[{name: T, ...}]` - ordered named fields.
    Record = 8,
    /// `Callable[A, B, ...]` - argument types only.
    Callable = 9,
    /// Deferred reference to a named record type.
    TypeRef = 10,
}

impl TypeKind {
    /// Whether this is a parameterless leaf (`Any` and the scalars).
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::Any | Self::Boolean | Self::String | Self::Integer | Self::Float
        )
    }

    /// Whether this kind wraps exactly one inner type.
    pub fn is_wrapper(self) -> bool {
        matches!(self, Self::Optional | Self::Sequence)
    }

    /// Number of parameters the constructor takes. `None` for variadic kinds.
    pub fn arity(self) -> Option<usize> {
        match self {
            Self::Any | Self::Boolean | Self::String | Self::Integer | Self::Float => Some(0),
            Self::Optional | Self::Sequence | Self::Record | Self::TypeRef => Some(1),
            Self::Mapping => Some(2),
            Self::Callable => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Optional => "Optional",
            Self::Sequence => "Sequence",
            Self::Mapping => "Mapping",
            Self::Record => "Record",
            Self::Callable => "Callable",
            Self::TypeRef => "TypeRef",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type in the schema algebra.
#[derive(Clone, Debug)]
pub enum Type {
    Any,
    Boolean,
    String,
    Integer,
    Float,
    Optional(Box<Type>),
    Sequence(Box<Type>),
    Mapping(Box<Type>, Box<Type>),
    Record(Fields),
    Callable(Vec<Type>),
    TypeRef(String),
}

/// Parameter accepted by [`Type::construct`].
#[derive(Clone, Debug)]
pub enum TypeParam {
    /// A type. Wherever a type is expected a bare name is also accepted.
    Type(Type),
    /// A name; becomes `TypeRef(name)` where a type is expected.
    Name(String),
    /// Ordered record fields.
    Fields(Vec<(String, Type)>),
}

impl From<Type> for TypeParam {
    fn from(ty: Type) -> Self {
        Self::Type(ty)
    }
}

impl From<&str> for TypeParam {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<Vec<(String, Type)>> for TypeParam {
    fn from(fields: Vec<(String, Type)>) -> Self {
        Self::Fields(fields)
    }
}

impl Type {
    /// Build a type from its tag and parameters.
    ///
    /// Fails when the parameter count does not match the kind's arity or a
    /// parameter has the wrong shape.
    pub fn construct(kind: TypeKind, params: Vec<TypeParam>) -> Result<Type, TypeError> {
        if let Some(expected) = kind.arity()
            && params.len() != expected
        {
            return Err(TypeError::Arity {
                kind,
                expected,
                found: params.len(),
            });
        }

        let mut params = params.into_iter().enumerate();

        let ty = match kind {
            TypeKind::Any => Type::Any,
            TypeKind::Boolean => Type::Boolean,
            TypeKind::String => Type::String,
            TypeKind::Integer => Type::Integer,
            TypeKind::Float => Type::Float,
            TypeKind::Optional => Type::optional(next_type(kind, &mut params)?),
            TypeKind::Sequence => Type::sequence(next_type(kind, &mut params)?),
            TypeKind::Mapping => {
                let key = next_type(kind, &mut params)?;
                let value = next_type(kind, &mut params)?;
                Type::mapping(key, value)
            }
            TypeKind::Record => match params.next() {
                Some((_, TypeParam::Fields(fields))) => Type::record(fields),
                _ => {
                    return Err(TypeError::Param {
                        kind,
                        index: 0,
                        expected: "a field list",
                    });
                }
            },
            TypeKind::Callable => {
                let args = params
                    .map(|(index, param)| param_to_type(kind, index, param))
                    .collect::<Result<Vec<_>, _>>()?;
                Type::Callable(args)
            }
            TypeKind::TypeRef => match params.next() {
                Some((_, TypeParam::Name(name))) => Type::TypeRef(name),
                _ => {
                    return Err(TypeError::Param {
                        kind,
                        index: 0,
                        expected: "a type name",
                    });
                }
            },
        };
        Ok(ty)
    }

    pub fn optional(inner: impl Into<Type>) -> Type {
        Type::Optional(Box::new(inner.into()))
    }

    pub fn sequence(item: impl Into<Type>) -> Type {
        Type::Sequence(Box::new(item.into()))
    }

    pub fn mapping(key: impl Into<Type>, value: impl Into<Type>) -> Type {
        Type::Mapping(Box::new(key.into()), Box::new(value.into()))
    }

    pub fn record<K, T>(fields: impl IntoIterator<Item = (K, T)>) -> Type
    where
        K: Into<String>,
        T: Into<Type>,
    {
        Type::Record(
            fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty.into()))
                .collect(),
        )
    }

    pub fn callable<T: Into<Type>>(args: impl IntoIterator<Item = T>) -> Type {
        Type::Callable(args.into_iter().map(Into::into).collect())
    }

    pub fn type_ref(name: impl Into<String>) -> Type {
        Type::TypeRef(name.into())
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Any => TypeKind::Any,
            Type::Boolean => TypeKind::Boolean,
            Type::String => TypeKind::String,
            Type::Integer => TypeKind::Integer,
            Type::Float => TypeKind::Float,
            Type::Optional(_) => TypeKind::Optional,
            Type::Sequence(_) => TypeKind::Sequence,
            Type::Mapping(..) => TypeKind::Mapping,
            Type::Record(_) => TypeKind::Record,
            Type::Callable(_) => TypeKind::Callable,
            Type::TypeRef(_) => TypeKind::TypeRef,
        }
    }

    /// Referenced name, if this is a `TypeRef`.
    pub fn as_type_ref(&self) -> Option<&str> {
        match self {
            Type::TypeRef(name) => Some(name),
            _ => None,
        }
    }

    /// Record fields, if this is a `Record`.
    pub fn as_record(&self) -> Option<&Fields> {
        match self {
            Type::Record(fields) => Some(fields),
            _ => None,
        }
    }
}

fn next_type(
    kind: TypeKind,
    params: &mut impl Iterator<Item = (usize, TypeParam)>,
) -> Result<Type, TypeError> {
    let (index, param) = params.next().expect("arity checked by caller");
    param_to_type(kind, index, param)
}

fn param_to_type(kind: TypeKind, index: usize, param: TypeParam) -> Result<Type, TypeError> {
    match param {
        TypeParam::Type(ty) => Ok(ty),
        TypeParam::Name(name) => Ok(Type::TypeRef(name)),
        TypeParam::Fields(_) => Err(TypeError::Param {
            kind,
            index,
            expected: "a type",
        }),
    }
}

impl From<&str> for Type {
    fn from(name: &str) -> Self {
        Type::TypeRef(name.to_owned())
    }
}

impl From<String> for Type {
    fn from(name: String) -> Self {
        Type::TypeRef(name)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Any, Type::Any)
            | (Type::Boolean, Type::Boolean)
            | (Type::String, Type::String)
            | (Type::Integer, Type::Integer)
            | (Type::Float, Type::Float) => true,
            (Type::Optional(a), Type::Optional(b)) => a == b,
            (Type::Sequence(a), Type::Sequence(b)) => a == b,
            (Type::Mapping(ak, av), Type::Mapping(bk, bv)) => ak == bk && av == bv,
            // IndexMap equality ignores order; records must not.
            (Type::Record(a), Type::Record(b)) => a.len() == b.len() && a.iter().eq(b.iter()),
            (Type::Callable(a), Type::Callable(b)) => a == b,
            (Type::TypeRef(a), Type::TypeRef(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Type::Any | Type::Boolean | Type::String | Type::Integer | Type::Float => {}
            Type::Optional(inner) | Type::Sequence(inner) => inner.hash(state),
            Type::Mapping(key, value) => {
                key.hash(state);
                value.hash(state);
            }
            Type::Record(fields) => {
                fields.len().hash(state);
                for (name, ty) in fields {
                    name.hash(state);
                    ty.hash(state);
                }
            }
            Type::Callable(args) => args.hash(state),
            Type::TypeRef(name) => name.hash(state),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any | Type::Boolean | Type::String | Type::Integer | Type::Float => {
                f.write_str(self.kind().name())
            }
            Type::Optional(inner) => write!(f, "Optional[{inner}]"),
            Type::Sequence(item) => write!(f, "Sequence[{item}]"),
            Type::Mapping(key, value) => write!(f, "Mapping[{key}, {value}]"),
            Type::Record(fields) => {
                f.write_str("Record[{")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{name}': {ty}")?;
                }
                f.write_str("}]")
            }
            Type::Callable(args) => {
                f.write_str("Callable[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str("]")
            }
            Type::TypeRef(name) => write!(f, "TypeRef['{name}']"),
        }
    }
}
