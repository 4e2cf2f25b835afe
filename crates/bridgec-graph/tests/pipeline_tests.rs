//! End-to-end discovery over the shared JSON fixture.

use bridgec_graph::{BUILTIN_ALLOWLIST, analyze, build_namespace_tree};
use bridgec_model::{
    DeclId, DeclKind, Declaration, DeclarationGraph, DeclarationOracle, Origin, load_graph, names,
};
use bridgec_common::BindingError;
use std::path::Path;

fn sample() -> DeclarationGraph {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../bridgec-model/tests/fixtures/sample_model.json");
    load_graph(&path).expect("fixture should load")
}

fn qualified(graph: &DeclarationGraph, ids: &[DeclId]) -> Vec<String> {
    ids.iter()
        .map(|&id| graph.qualified_name(id).unwrap_or("<anonymous>").to_string())
        .collect()
}

#[test]
fn test_sample_analysis_keeps_source_declarations() {
    let graph = sample();
    let analysis = analyze(&graph, names::BINDING_ANNOTATION, names::BINDING_IGNORE_ANNOTATION).unwrap();

    let mut kept = qualified(&graph, &analysis.filtered);
    kept.sort();
    assert_eq!(
        kept,
        vec![
            "com.example.Box",
            "com.example.Circle",
            "com.example.Mode",
            "com.example.People",
            "com.example.Person",
            "com.example.Shape",
            "com.example.Unknown",
            "com.example.describe",
            "com.example.version",
        ]
    );
    assert_eq!(analysis.entry_points.member_functions.len(), 1);
}

#[test]
fn test_filter_output_is_a_subset_of_the_closure() {
    let graph = sample();
    let analysis = analyze(&graph, names::BINDING_ANNOTATION, names::BINDING_IGNORE_ANNOTATION).unwrap();

    for id in &analysis.filtered {
        assert!(analysis.collected.contains(id));
        let decl = graph.get(*id).unwrap();
        assert_eq!(decl.origin, Origin::Source);
        assert!(!BUILTIN_ALLOWLIST.contains(&decl.qualified_name.as_deref().unwrap()));
        assert!(!matches!(decl.kind, DeclKind::TypeParameter(_)));
        if matches!(decl.kind, DeclKind::Function(_) | DeclKind::Property(_)) {
            assert!(decl.parent.is_none(), "member leaked: {}", decl.display_name());
        }
    }
    let string = graph.lookup(names::STRING).unwrap();
    assert!(analysis.collected.contains(&string));
    assert!(!analysis.filtered.contains(&string));
}

#[test]
fn test_namespace_tree_partitions_filtered_declarations() {
    let graph = sample();
    let analysis = analyze(&graph, names::BINDING_ANNOTATION, names::BINDING_IGNORE_ANNOTATION).unwrap();

    let example = analysis.root.find("com.example").expect("com.example node");
    assert_eq!(example.declarations.len(), analysis.filtered.len());
    assert!(analysis.root.declarations.is_empty());

    let mut from_tree = analysis.root.all_declarations();
    let mut filtered = analysis.filtered.clone();
    from_tree.sort();
    filtered.sort();
    assert_eq!(from_tree, filtered);
}

#[test]
fn test_originating_files_are_distinct() {
    let graph = sample();
    let analysis = analyze(&graph, names::BINDING_ANNOTATION, names::BINDING_IGNORE_ANNOTATION).unwrap();

    let mut files = analysis.originating_files.clone();
    files.sort();
    assert_eq!(files, vec!["Api.kt", "Box.kt", "Mode.kt", "Person.kt", "Shape.kt"]);
}

#[test]
fn test_library_declarations_are_dropped() {
    let mut graph = DeclarationGraph::with_builtins();
    let external = graph.add(Declaration::class("org.lib.External", bridgec_model::ClassKind::Class).library());
    graph.add(
        Declaration::top_level_property("com.example.ext", bridgec_model::TypeRef::new(external), false)
            .annotated(names::BINDING_ANNOTATION)
            .in_file("Ext.kt"),
    );

    let analysis = analyze(&graph, names::BINDING_ANNOTATION, names::BINDING_IGNORE_ANNOTATION).unwrap();
    assert!(analysis.collected.contains(&external));
    assert_eq!(qualified(&graph, &analysis.filtered), vec!["com.example.ext"]);
}

#[test]
fn test_missing_qualified_name_aborts_tree_building() {
    let mut graph = DeclarationGraph::with_builtins();
    let local = graph.add(
        Declaration::class("com.example.Local", bridgec_model::ClassKind::Class).without_qualified_name(),
    );
    let err = build_namespace_tree(&graph, &[local]).unwrap_err();
    assert!(matches!(err, BindingError::MissingQualifiedName { .. }), "{err}");
}

#[test]
fn test_empty_graph_produces_empty_analysis() {
    let graph = DeclarationGraph::with_builtins();
    let analysis = analyze(&graph, names::BINDING_ANNOTATION, names::BINDING_IGNORE_ANNOTATION).unwrap();
    assert!(analysis.entry_points.is_empty());
    assert!(analysis.filtered.is_empty());
    assert!(analysis.root.children.is_empty());
    assert!(analysis.originating_files.is_empty());
}
