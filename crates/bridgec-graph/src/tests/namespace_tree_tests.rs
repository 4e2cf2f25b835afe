use super::*;
use bridgec_model::{ClassKind, Declaration, DeclarationGraph};

fn graph_with(names: &[&str]) -> (DeclarationGraph, Vec<DeclId>) {
    let mut graph = DeclarationGraph::new();
    let ids = names
        .iter()
        .map(|name| graph.add(Declaration::class(name, ClassKind::Class)))
        .collect();
    (graph, ids)
}

#[test]
fn test_declarations_terminate_at_their_namespace() {
    let (graph, ids) = graph_with(&["com.example.Person", "com.example.Shape", "com.other.Thing"]);
    let root = build_namespace_tree(&graph, &ids).unwrap();

    assert_eq!(root.name, "");
    assert_eq!(root.children.len(), 1);
    let com = root.child("com").unwrap();
    assert_eq!(
        com.children.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["example", "other"]
    );
    assert_eq!(root.find("com.example").unwrap().declarations, vec![ids[0], ids[1]]);
    assert_eq!(root.find("com.other").unwrap().declarations, vec![ids[2]]);
}

#[test]
fn test_nested_declarations_form_child_nodes() {
    let (graph, ids) = graph_with(&["com.example.Shape", "com.example.Shape.Circle"]);
    let root = build_namespace_tree(&graph, &ids).unwrap();

    let example = root.find("com.example").unwrap();
    assert_eq!(example.declarations, vec![ids[0]]);
    assert_eq!(example.child("Shape").unwrap().declarations, vec![ids[1]]);
}

#[test]
fn test_unqualified_names_stay_at_root() {
    let (graph, ids) = graph_with(&["TopLevel", "pkg.Inner"]);
    let root = build_namespace_tree(&graph, &ids).unwrap();
    assert_eq!(root.declarations, vec![ids[0]]);
    assert_eq!(root.child("pkg").unwrap().declarations, vec![ids[1]]);
}

#[test]
fn test_every_declaration_appears_exactly_once() {
    let (graph, ids) = graph_with(&[
        "a.b.C",
        "a.b.C.D",
        "a.E",
        "x.y.z.W",
        "a.b.F",
        "Root",
    ]);
    let root = build_namespace_tree(&graph, &ids).unwrap();
    let mut all = root.all_declarations();
    all.sort();
    assert_eq!(all, ids);
}

#[test]
fn test_empty_input_yields_empty_root() {
    let graph = DeclarationGraph::new();
    assert_eq!(build_namespace_tree(&graph, &[]).unwrap(), NamespaceNode::default());
}

#[test]
fn test_missing_qualified_name_is_an_error() {
    let mut graph = DeclarationGraph::new();
    let id = graph.add(Declaration::class("com.example.Anon", ClassKind::Object).without_qualified_name());
    let err = build_namespace_tree(&graph, &[id]).unwrap_err();
    assert!(matches!(err, BindingError::MissingQualifiedName { .. }));
}

#[test]
fn test_find_empty_path_is_self() {
    let (graph, ids) = graph_with(&["com.A"]);
    let root = build_namespace_tree(&graph, &ids).unwrap();
    assert!(std::ptr::eq(root.find("").unwrap(), &root));
    assert!(root.find("com.missing").is_none());
}
