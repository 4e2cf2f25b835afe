//! Tests for loading declaration graphs from JSON.

use bridgec_model::{
    ClassKind, DeclKind, DeclarationOracle, LoadError, Modifiers, Origin, load_graph,
    load_graph_from_str, names,
};
use std::path::Path;

fn sample() -> bridgec_model::DeclarationGraph {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_model.json");
    load_graph(&path).expect("fixture should load")
}

#[test]
fn test_sample_declarations_resolve() {
    let graph = sample();
    let person = graph.lookup("com.example.Person").expect("Person");
    let decl = graph.get(person).unwrap();
    assert_eq!(decl.origin, Origin::Source);
    assert!(decl.modifiers.contains(Modifiers::DATA));
    assert_eq!(decl.containing_file.as_deref(), Some("Person.kt"));
    assert_eq!(decl.location.line, 4);

    let members = graph.members(person).unwrap();
    assert_eq!(members.len(), 4);
    let ctor = graph.get(members[0]).unwrap();
    let DeclKind::Function(function) = &ctor.kind else {
        panic!("expected constructor, got {:?}", ctor.kind);
    };
    assert!(function.is_constructor);
    assert_eq!(function.parameters[1].name, "age");
    assert!(function.parameters[1].ty.nullable);
    assert_eq!(
        graph.qualified_name(function.parameters[1].ty.decl),
        Some(names::INT)
    );
}

#[test]
fn test_sealed_variants_are_derived_from_super_types() {
    let graph = sample();
    let shape = graph.lookup("com.example.Shape").unwrap();
    let circle = graph.lookup("com.example.Circle").unwrap();
    let unknown = graph.lookup("com.example.Unknown").unwrap();
    let class = graph.get(shape).unwrap().as_class().unwrap();
    assert_eq!(class.sealed_subclasses, vec![circle, unknown]);
}

#[test]
fn test_enum_entries_shorthand() {
    let graph = sample();
    let mode = graph.lookup("com.example.Mode").unwrap();
    let entries: Vec<_> = graph
        .members(mode)
        .unwrap()
        .iter()
        .map(|id| graph.get(*id).unwrap())
        .filter(|decl| decl.class_kind() == Some(ClassKind::EnumEntry))
        .map(|decl| decl.name.as_str())
        .collect();
    assert_eq!(entries, vec!["Option1", "OPTION2", "OPTION_3"]);
}

#[test]
fn test_type_parameter_references_resolve_to_scope() {
    let graph = sample();
    let box_id = graph.lookup("com.example.Box").unwrap();
    let class = graph.get(box_id).unwrap().as_class().unwrap();
    let type_param = class.type_parameters[0];
    let unwrap = graph.get(class.members[0]).unwrap();
    let return_type = unwrap.as_function().unwrap().return_type.clone().unwrap();
    assert_eq!(return_type.decl, type_param);

    let DeclKind::TypeParameter(param) = &graph.get(type_param).unwrap().kind else {
        panic!("expected type parameter");
    };
    assert!(param.bounds[0].nullable);
}

#[test]
fn test_unknown_type_names_load_as_error_type() {
    let graph = load_graph_from_str(
        r#"{ "declarations": [
            { "kind": "function", "qualifiedName": "a.f", "returnType": "a.Missing" }
        ] }"#,
    )
    .unwrap();
    let f = graph.lookup("a.f").unwrap();
    let return_type = graph.get(f).unwrap().as_function().unwrap().return_type.clone();
    assert!(return_type.unwrap().is_error());
}

#[test]
fn test_nested_generic_arguments_keep_their_structure() {
    let graph = load_graph_from_str(
        r#"{ "declarations": [
            { "kind": "function", "qualifiedName": "a.f",
              "returnType": "kotlin.collections.List<kotlin.collections.List<kotlin.collections.List<kotlin.Int>>?>" }
        ] }"#,
    )
    .unwrap();
    let f = graph.lookup("a.f").unwrap();
    let outer = graph.get(f).unwrap().as_function().unwrap().return_type.clone().unwrap();
    let middle = outer.type_arguments().next().unwrap();
    assert!(middle.nullable);
    let inner = middle.type_arguments().next().unwrap();
    let int = inner.type_arguments().next().unwrap();
    assert_eq!(graph.qualified_name(int.decl), Some(names::INT));
    assert!(int.arguments.is_empty());
    assert_eq!(
        graph.describe_type(&outer),
        "kotlin.collections.List<kotlin.collections.List<kotlin.collections.List<kotlin.Int>>?>"
    );
}

#[test]
fn test_missing_return_type_defaults_to_unit() {
    let graph = load_graph_from_str(
        r#"{ "declarations": [ { "kind": "function", "qualifiedName": "a.f" } ] }"#,
    )
    .unwrap();
    let f = graph.lookup("a.f").unwrap();
    let return_type = graph.get(f).unwrap().as_function().unwrap().return_type.clone().unwrap();
    assert_eq!(graph.qualified_name(return_type.decl), Some(names::UNIT));
}

#[test]
fn test_local_declaration_has_no_qualified_name() {
    let graph = load_graph_from_str(
        r#"{ "declarations": [ { "kind": "class", "name": "Local" } ] }"#,
    )
    .unwrap();
    let local = graph.iter().find(|decl| decl.name == "Local").unwrap();
    assert!(local.qualified_name.is_none());
}

#[test]
fn test_load_errors() {
    let missing = load_graph_from_str(r#"{ "declarations": [ { "kind": "class" } ] }"#);
    assert!(matches!(missing, Err(LoadError::MissingName { index: 0 })));

    let modifier = load_graph_from_str(
        r#"{ "declarations": [ { "kind": "class", "qualifiedName": "a.B", "modifiers": ["open"] } ] }"#,
    );
    assert!(matches!(modifier, Err(LoadError::UnknownModifier { .. })));

    let json = load_graph_from_str("{ not json");
    assert!(matches!(json, Err(LoadError::Json(_))));
    assert_eq!(
        json.err().map(|err| err.to_string()).as_deref(),
        Some("Invalid declaration graph JSON")
    );

    let io = load_graph(Path::new("/definitely/not/here.json"));
    assert!(matches!(io, Err(LoadError::Io { .. })));
}
