//! Directive catalog exposed through `__schema.directives`.

use super::Ident;

#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveArg {
    pub name: String,
    pub ty: Ident,
    pub description: String,
    /// Default rendered as GraphQL value text.
    pub default_value: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDef {
    pub name: String,
    pub locations: Vec<String>,
    pub description: String,
    pub args: Vec<DirectiveArg>,
}

impl DirectiveDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locations: Vec::new(),
            description: description.into(),
            args: Vec::new(),
        }
    }

    pub fn locations<S: Into<String>>(mut self, locations: impl IntoIterator<Item = S>) -> Self {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn arg(
        mut self,
        name: impl Into<String>,
        ty: Ident,
        description: impl Into<String>,
    ) -> Self {
        self.args.push(DirectiveArg {
            name: name.into(),
            ty,
            description: description.into(),
            default_value: None,
        });
        self
    }

    pub fn find_arg(&self, name: &str) -> Option<&DirectiveArg> {
        self.args.iter().find(|a| a.name == name)
    }
}

const EXECUTABLE: [&str; 3] = ["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"];

fn non_null_scalar(name: &str) -> Ident {
    Ident::non_null(Ident::scalar(name))
}

/// `skip`, `include`, `deprecated` and `cached`, in that order.
pub fn builtin_directives() -> Vec<DirectiveDef> {
    vec![
        DirectiveDef::new(
            "skip",
            "Directs the executor to skip this field or fragment when the `if` argument is true.",
        )
        .locations(EXECUTABLE)
        .arg("if", non_null_scalar("Boolean"), "Skipped when true."),
        DirectiveDef::new(
            "include",
            "Directs the executor to include this field or fragment only when the `if` argument is true.",
        )
        .locations(EXECUTABLE)
        .arg("if", non_null_scalar("Boolean"), "Included when true."),
        DirectiveDef::new("deprecated", "Marks the field or enum value as deprecated")
            .locations(["FIELD_DEFINITION", "ENUM_VALUE"])
            .arg("reason", Ident::scalar("String"), "Deprecation reason."),
        DirectiveDef::new("cached", "Caches node and all its fields")
            .locations(EXECUTABLE)
            .arg(
                "ttl",
                non_null_scalar("Int"),
                "How long field will live in cache.",
            ),
    ]
}
