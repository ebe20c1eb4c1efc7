//! Batched resolvers of the meta-schema.
//!
//! Plain functions over an explicit [`SchemaInfo`]; the meta graph binds
//! each of them once. Field resolvers return one row per id, link
//! resolvers one value per id.

use skein_core::TypeVisitor;

use super::Ident;
use super::schema::{MUTATION_ROOT_NAME, QUERY_ROOT_NAME, SCALARS, SchemaInfo};
use super::ident::INPUT_OBJECT_PREFIX;
use crate::Value;
use crate::graph::{FieldOutput, FieldRequest, LinkOutput, Options, ResolveError};

fn ident(id: &Value) -> Result<&Ident, ResolveError> {
    id.as_ident()
        .ok_or_else(|| ResolveError::UnexpectedId(format!("{id:?}")))
}

fn unexpected(ident: &Ident) -> ResolveError {
    ResolveError::UnexpectedId(ident.to_string())
}

/// Pick the requested fields out of `info`, null for anything absent.
fn project(fields: &[FieldRequest], info: &[(&str, Value)]) -> Vec<Value> {
    fields
        .iter()
        .map(|f| {
            info.iter()
                .find(|(key, _)| *key == f.name)
                .map_or(Value::Null, |(_, value)| value.clone())
        })
        .collect()
}

fn list(idents: impl IntoIterator<Item = Ident>) -> Value {
    Value::List(idents.into_iter().map(Value::Ident).collect())
}

pub fn type_info(schema: &SchemaInfo, fields: &[FieldRequest], ids: &[Value]) -> FieldOutput {
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let kind = ident.type_kind().ok_or_else(|| unexpected(ident))?;
            let mut info = vec![("id", id.clone()), ("kind", Value::from(kind))];
            match ident {
                Ident::Object(name) => {
                    let description = schema.node(name).and_then(|n| n.description);
                    info.push(("name", Value::from(name.as_str())));
                    info.push(("description", Value::from(description)));
                }
                Ident::InputObject(_) | Ident::Scalar(_) => {
                    info.push(("name", Value::from(ident.type_name())));
                }
                _ => {}
            }
            Ok(project(fields, &info))
        })
        .collect()
}

pub fn type_fields_link(schema: &SchemaInfo, ids: &[Value], options: &Options) -> LinkOutput {
    let include_deprecated = options
        .get("includeDeprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let Ident::Object(name) = ident else {
                return Ok(Value::List(Vec::new()));
            };
            let field = |member: &str| Ident::Field {
                node: name.clone(),
                name: member.to_owned(),
            };
            if let Some(node) = schema.node(name) {
                if node.exposed().next().is_none() {
                    return Err(ResolveError::NoExposedFields(name.clone()));
                }
                let members = node
                    .exposed()
                    .filter(|m| include_deprecated || m.deprecated().is_none())
                    .map(|m| field(m.name()));
                return Ok(list(members));
            }
            let record = schema.data_type(name).ok_or_else(|| unexpected(ident))?;
            if record.is_empty() {
                return Err(ResolveError::NoExposedFields(name.clone()));
            }
            Ok(list(record.keys().map(|key| field(key.as_str()))))
        })
        .collect()
}

pub fn type_of_type_link(_schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    ids.iter()
        .map(|id| {
            let of_type = ident(id)?.of_type().cloned();
            Ok(Value::from(of_type))
        })
        .collect()
}

pub fn type_input_fields_link(
    schema: &SchemaInfo,
    ids: &[Value],
    _options: &Options,
) -> LinkOutput {
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let Ident::InputObject(ty) = ident else {
                return Ok(Value::List(Vec::new()));
            };
            let record = schema.data_type(ty).ok_or_else(|| unexpected(ident))?;
            Ok(list(record.keys().map(|key| Ident::InputObjectField {
                ty: ty.clone(),
                key: key.clone(),
            })))
        })
        .collect()
}

/// `interfaces`, `possibleTypes`, `enumValues`: never populated.
pub fn na_many(_schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    Ok(vec![Value::List(Vec::new()); ids.len()])
}

/// `subscriptionType`: never populated.
pub fn na_maybe(_schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    Ok(vec![Value::Null; ids.len()])
}

pub fn not_implemented(
    _schema: &SchemaInfo,
    _fields: &[FieldRequest],
    _ids: &[Value],
) -> FieldOutput {
    Err(ResolveError::NotImplemented("__EnumValue"))
}

pub fn field_info(schema: &SchemaInfo, fields: &[FieldRequest], ids: &[Value]) -> FieldOutput {
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let Ident::Field { node, name } = ident else {
                return Err(unexpected(ident));
            };
            let info = match schema.node(node) {
                Some(view) => {
                    let member = view.member(name).ok_or_else(|| unexpected(ident))?;
                    let deprecated = member.deprecated();
                    vec![
                        ("id", id.clone()),
                        ("name", Value::from(member.name())),
                        ("description", Value::from(member.description())),
                        ("isDeprecated", Value::from(deprecated.is_some())),
                        (
                            "deprecationReason",
                            Value::from(deprecated.and_then(|d| d.reason.clone())),
                        ),
                    ]
                }
                None => vec![
                    ("id", id.clone()),
                    ("name", Value::from(name.as_str())),
                    ("isDeprecated", Value::from(false)),
                ],
            };
            Ok(project(fields, &info))
        })
        .collect()
}

pub fn field_type_link(schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    let mut type_ident = schema.type_ident(false);
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let Ident::Field { node, name } = ident else {
                return Err(unexpected(ident));
            };
            let ty = match schema.node(node) {
                Some(view) => view.member(name).ok_or_else(|| unexpected(ident))?.ty(),
                None => schema
                    .data_type(node)
                    .and_then(|record| record.get(name))
                    .ok_or_else(|| unexpected(ident))?
                    .clone(),
            };
            Ok(Value::Ident(type_ident.visit(&ty)?))
        })
        .collect()
}

pub fn field_args_link(schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let Ident::Field { node, name } = ident else {
                return Err(unexpected(ident));
            };
            let Some(view) = schema.node(node) else {
                return Ok(Value::List(Vec::new()));
            };
            let member = view.member(name).ok_or_else(|| unexpected(ident))?;
            Ok(list(member.options().iter().map(|option| Ident::FieldArg {
                node: node.clone(),
                field: name.clone(),
                name: option.name.clone(),
            })))
        })
        .collect()
}

pub fn input_value_info(
    schema: &SchemaInfo,
    fields: &[FieldRequest],
    ids: &[Value],
) -> FieldOutput {
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let info = match ident {
                Ident::FieldArg { node, field, name } => {
                    let option = schema
                        .node(node)
                        .and_then(|view| view.member(field))
                        .and_then(|member| member.option(name))
                        .ok_or_else(|| unexpected(ident))?;
                    let default = option
                        .default
                        .as_ref()
                        .map(serde_json::to_string)
                        .transpose()
                        .map_err(|err| ResolveError::custom(err.to_string()))?;
                    vec![
                        ("id", id.clone()),
                        ("name", Value::from(option.name.as_str())),
                        ("description", Value::from(option.description.as_deref())),
                        ("defaultValue", Value::from(default)),
                    ]
                }
                Ident::InputObjectField { key, .. } => {
                    vec![("id", id.clone()), ("name", Value::from(key.as_str()))]
                }
                Ident::DirectiveArg { directive, arg } => {
                    let arg = schema
                        .directive(directive)
                        .and_then(|d| d.find_arg(arg))
                        .ok_or_else(|| unexpected(ident))?;
                    vec![
                        ("id", id.clone()),
                        ("name", Value::from(arg.name.as_str())),
                        ("description", Value::from(arg.description.as_str())),
                        ("defaultValue", Value::from(arg.default_value.clone())),
                    ]
                }
                _ => return Err(unexpected(ident)),
            };
            Ok(project(fields, &info))
        })
        .collect()
}

pub fn input_value_type_link(schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    let mut type_ident = schema.type_ident(true);
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let type_id = match ident {
                Ident::FieldArg { node, field, name } => {
                    let option = schema
                        .node(node)
                        .and_then(|view| view.member(field))
                        .and_then(|member| member.option(name))
                        .ok_or_else(|| unexpected(ident))?;
                    type_ident.visit(&option.ty)?
                }
                Ident::InputObjectField { ty, key } => {
                    let field_ty = schema
                        .data_type(ty)
                        .and_then(|record| record.get(key))
                        .ok_or_else(|| unexpected(ident))?;
                    type_ident.visit(field_ty)?
                }
                Ident::DirectiveArg { directive, arg } => schema
                    .directive(directive)
                    .and_then(|d| d.find_arg(arg))
                    .ok_or_else(|| unexpected(ident))?
                    .ty
                    .clone(),
                _ => return Err(unexpected(ident)),
            };
            Ok(Value::Ident(type_id))
        })
        .collect()
}

pub fn directive_info(schema: &SchemaInfo, fields: &[FieldRequest], ids: &[Value]) -> FieldOutput {
    ids.iter()
        .map(|id| {
            let ident = ident(id)?;
            let directive = match ident {
                Ident::Directive(name) => schema.directive(name),
                _ => None,
            }
            .ok_or_else(|| unexpected(ident))?;
            let info = [
                ("name", Value::from(directive.name.as_str())),
                ("description", Value::from(directive.description.as_str())),
                ("locations", Value::from(directive.locations.clone())),
            ];
            Ok(project(fields, &info))
        })
        .collect()
}

/// Ids are directive names, taken from the `name` field.
pub fn directive_args_link(schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    ids.iter()
        .map(|id| {
            let directive = id
                .as_str()
                .and_then(|name| schema.directive(name))
                .ok_or_else(|| ResolveError::UnexpectedId(format!("{id:?}")))?;
            Ok(list(directive.args.iter().map(|arg| Ident::DirectiveArg {
                directive: directive.name.clone(),
                arg: arg.name.clone(),
            })))
        })
        .collect()
}

pub fn schema_link(_schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    Ok(vec![Value::Null; ids.len()])
}

/// `__type(name)`: nodes and roots, data types as objects or (with the
/// input prefix) input objects, then scalars. Unknown names are null.
pub fn type_link(schema: &SchemaInfo, ids: &[Value], options: &Options) -> LinkOutput {
    let name = options
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let found = if schema.node(name).is_some() || schema.data_type(name).is_some() {
        Some(Ident::object(name))
    } else if let Some(data_type) = name.strip_prefix(INPUT_OBJECT_PREFIX)
        && schema.data_type(data_type).is_some()
    {
        Some(Ident::input_object(data_type))
    } else if SCALARS.contains(&name) {
        Some(Ident::scalar(name))
    } else {
        None
    };
    Ok(vec![Value::from(found); ids.len()])
}

pub fn schema_types(schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    let scalars = SCALARS.iter().map(|&name| Ident::scalar(name));
    let objects = schema.nodes().map(|(name, _)| Ident::object(name));
    let data_types = schema
        .data_types()
        .iter()
        .filter(|(_, ty)| ty.as_record().is_some())
        .flat_map(|(name, _)| {
            let name = name.as_str();
            [Ident::object(name), Ident::input_object(name)]
        });
    let types = list(scalars.chain(objects).chain(data_types));
    Ok(vec![types; ids.len()])
}

pub fn schema_query_type(_schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    let query = Value::Ident(Ident::object(QUERY_ROOT_NAME));
    Ok(vec![query; ids.len()])
}

pub fn schema_mutation_type(schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    let mutation = schema
        .mutation_graph()
        .map(|_| Ident::object(MUTATION_ROOT_NAME));
    Ok(vec![Value::from(mutation); ids.len()])
}

pub fn schema_directives(schema: &SchemaInfo, ids: &[Value], _options: &Options) -> LinkOutput {
    let directives = list(
        schema
            .directives()
            .iter()
            .map(|d| Ident::Directive(d.name.clone())),
    );
    Ok(vec![directives; ids.len()])
}
