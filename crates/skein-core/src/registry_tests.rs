use super::*;

fn registry() -> Types {
    [("Foo", Type::record([("bar", Type::Integer)]))]
        .into_iter()
        .collect()
}

#[test]
fn resolve_is_identity_for_non_refs() {
    let types = registry();
    let ty = Type::sequence("Foo");

    assert_eq!(types.resolve(&ty), Ok(&ty));
}

#[test]
fn resolve_looks_up_refs() {
    let types = registry();

    assert_eq!(
        types.resolve(&Type::type_ref("Foo")),
        Ok(&Type::record([("bar", Type::Integer)]))
    );
}

#[test]
fn resolve_unknown_ref() {
    let types = registry();

    assert_eq!(
        types.resolve(&Type::type_ref("Missing")),
        Err(TypeError::UnknownType("Missing".into()))
    );
}

#[test]
fn insertion_order_is_kept() {
    let mut types = registry();
    types.insert("Abc", Type::record([("x", Type::String)]));

    let names: Vec<_> = types.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["Foo", "Abc"]);
    assert_eq!(types.len(), 2);
    assert!(types.contains("Abc"));
}

#[test]
#[should_panic(expected = "unknown type: Missing")]
fn ensure_resolved_panics_on_unknown() {
    registry().ensure_resolved(&Type::type_ref("Missing"));
}
