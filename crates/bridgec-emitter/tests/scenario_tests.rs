//! End-to-end generation scenarios, from declaration graph to output units.

use bridgec_common::{BindingError, ErrorCategory};
use bridgec_emitter::projection::MemberKind;
use bridgec_emitter::{GeneratorOptions, generate};
use bridgec_model::{
    ClassKind, DeclId, Declaration, DeclarationGraph, Modifiers, Parameter, TypeRef, load_graph, names,
};
use std::path::Path;

const BINDING: &str = names::BINDING_ANNOTATION;

fn sample() -> DeclarationGraph {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../bridgec-model/tests/fixtures/sample_model.json");
    load_graph(&path).expect("fixture should load")
}

fn definitions(graph: &DeclarationGraph) -> String {
    let result = generate(graph, &GeneratorOptions::default()).unwrap();
    result.unit("ApiDefinitions.cs").unwrap().content.clone()
}

// =============================================================================
// Shared fixture
// =============================================================================

#[test]
fn test_sample_output_units() {
    let graph = sample();
    let result = generate(&graph, &GeneratorOptions::default()).unwrap();

    let paths: Vec<&str> = result.units.iter().map(|unit| unit.path.as_str()).collect();
    assert_eq!(paths, ["ApiDefinitions.cs", "ApiDefinitions.members.json"]);

    let mut files = result.originating_files.clone();
    files.sort();
    assert_eq!(files, ["Api.kt", "Box.kt", "Mode.kt", "Person.kt", "Shape.kt"]);

    let content = &result.units[0].content;
    assert!(content.starts_with("using Foundation;\nnamespace Bindings\n{\n  using People = Bindings.SharedPerson[];\n"));
    assert!(content.ends_with("  }\n}\n"));
}

#[test]
fn test_sample_person_declaration() {
    let content = definitions(&sample());
    let expected = "
  [BaseType (typeof(Bindings.SharedBase))]
  interface SharedPerson : ObjCRuntime.INativeObject
  {
    [Export (\"initWithName:age:\"), DesignatedInitializer]
    ObjCRuntime.NativeHandle Constructor (string name, [ObjCRuntime.BindAs (typeof (int?)), NullAllowed] Foundation.NSNumber age);

    [Export (\"greetOther:\")]
    string Greet (Bindings.SharedPerson other);

    [Export (\"name\")]
    string Name { get; }

    [Export (\"age\"), ObjCRuntime.BindAs (typeof (int?)), NullAllowed]
    Foundation.NSNumber Age { get; set; }
  }
";
    assert!(content.contains(expected), "{content}");
}

#[test]
fn test_sample_generic_and_top_level_declarations() {
    let content = definitions(&sample());
    assert!(content.contains(
        "    [Export (\"unwrap\"), NullAllowed]\n    Foundation.NSObject Unwrap ();\n"
    ));
    let container = "
  [BaseType (typeof(SharedBase))]
  interface SharedApiKt
  {
    [Static, Export (\"describePeople:\")]
    string Describe (People people);

    [Static, Export (\"version\")]
    string Version { get; }
  }
";
    assert!(content.contains(container), "{content}");
}

#[test]
fn test_sample_projection_json() {
    let graph = sample();
    let result = generate(&graph, &GeneratorOptions::default()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.units[1].content).unwrap();

    assert_eq!(json["namespace"], "Bindings");
    let declarations = json["declarations"].as_array().unwrap();
    let person = declarations
        .iter()
        .find(|decl| decl["identifier"] == "SharedPerson")
        .unwrap();
    assert_eq!(person["qualifiedName"], "com.example.Person");
    assert_eq!(person["kind"], "class");
    assert_eq!(person["members"][0]["kind"], "constructor");
    assert_eq!(person["members"][0]["export"], "initWithName:age:");
    assert_eq!(person["members"][0]["parameters"][1]["type"]["name"], "Foundation.NSNumber");
    let age = &person["members"][3];
    assert_eq!(age["name"], "Age");
    assert_eq!(age["mutable"], true);
    assert_eq!(age["static"], false);

    let container = declarations
        .iter()
        .find(|decl| decl["identifier"] == "SharedApiKt")
        .unwrap();
    assert_eq!(container["kind"], "fileContainer");
    assert!(container.get("qualifiedName").is_none());
}

#[test]
fn test_projection_can_be_disabled() {
    let options = GeneratorOptions {
        emit_member_projection: false,
        output_file_stem: "Shared".to_string(),
        ..GeneratorOptions::default()
    };
    let result = generate(&sample(), &options).unwrap();
    assert_eq!(result.units.len(), 1);
    assert_eq!(result.units[0].path, "Shared.cs");
    assert!(!result.projection.declarations.is_empty());
}

#[test]
fn test_generation_is_repeatable() {
    let graph = sample();
    let first = generate(&graph, &GeneratorOptions::default()).unwrap();
    let second = generate(&graph, &GeneratorOptions::default()).unwrap();
    assert_eq!(first.units, second.units);
}

#[test]
fn test_custom_prefix_and_namespace() {
    let options = GeneratorOptions {
        binding_prefix: "Core".to_string(),
        binding_namespace: "CoreBindings".to_string(),
        ..GeneratorOptions::default()
    };
    let result = generate(&sample(), &options).unwrap();
    let content = &result.units[0].content;
    assert!(content.contains("namespace CoreBindings\n"));
    assert!(content.contains("interface CorePerson : ObjCRuntime.INativeObject"));
    assert!(content.contains("[BaseType (typeof(CoreBindings.CoreShape))]"));
    assert!(!content.contains("SharedPerson"));
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_method_export_and_boxed_nullable_int() {
    let mut graph = DeclarationGraph::with_builtins();
    let api = graph.add(Declaration::class("com.example.Api", ClassKind::Class).annotated(BINDING).in_file("Api.kt"));
    let params = vec![
        Parameter::new("name", graph.type_ref(names::STRING)),
        Parameter::new("age", graph.type_ref(names::INT).nullable()),
    ];
    let string = graph.type_ref(names::STRING);
    graph.add_member(api, Declaration::function("methodName", params, string).annotated(BINDING));

    let result = generate(&graph, &GeneratorOptions::default()).unwrap();
    let method = &result.projection.declaration("SharedApi").unwrap().members[0];
    assert_eq!(method.export, "methodNameName:age:");
    let age = &method.parameters[1].ty;
    assert_eq!(age.name, "Foundation.NSNumber");
    assert_eq!(age.attributes, ["ObjCRuntime.BindAs (typeof (int?))", "NullAllowed"]);
}

fn add_variant(graph: &mut DeclarationGraph, root: DeclId, name: &str, kind: ClassKind, param: Option<&str>) {
    let id = graph.add(
        Declaration::class(&format!("com.example.{name}"), kind)
            .with_modifiers(Modifiers::DATA)
            .in_file("Shape.kt")
            .with_super_types(vec![TypeRef::new(root)]),
    );
    let parameters = param
        .map(|param| vec![Parameter::new(param, graph.type_ref(names::DOUBLE))])
        .unwrap_or_default();
    graph.add_member(id, Declaration::constructor(parameters));
    graph.add_sealed_subclass(root, id);
}

#[test]
fn test_scenario_sealed_union_with_singleton_variant() {
    let mut graph = DeclarationGraph::with_builtins();
    let shape = graph.add(
        Declaration::class("com.example.Shape", ClassKind::Class)
            .annotated(BINDING)
            .with_modifiers(Modifiers::SEALED)
            .in_file("Shape.kt"),
    );
    add_variant(&mut graph, shape, "Circle", ClassKind::Class, Some("radius"));
    add_variant(&mut graph, shape, "Square", ClassKind::Class, Some("side"));
    add_variant(&mut graph, shape, "Unknown", ClassKind::Object, None);

    let result = generate(&graph, &GeneratorOptions::default()).unwrap();
    let content = &result.units[0].content;
    assert!(content.contains(
        "  [BaseType (typeof(Bindings.SharedShape))]
  interface SharedCircle : ObjCRuntime.INativeObject
  {
    [Export (\"initWithRadius:\"), DesignatedInitializer]
    ObjCRuntime.NativeHandle Constructor (double radius);
  }
"
    ));
    assert!(content.contains(
        "  [BaseType (typeof(Bindings.SharedShape))]
  interface SharedUnknown : ObjCRuntime.INativeObject
  {
    [Static, Export (\"unknown\")]
    SharedUnknown Unknown ();
  }
"
    ));

    for (identifier, kind) in [
        ("SharedCircle", MemberKind::Constructor),
        ("SharedSquare", MemberKind::Constructor),
        ("SharedUnknown", MemberKind::SingletonAccessor),
    ] {
        let projected = result.projection.declaration(identifier).unwrap();
        assert_eq!(projected.base.as_deref(), Some("Bindings.SharedShape"));
        let kinds: Vec<MemberKind> = projected.members.iter().map(|member| member.kind).collect();
        assert_eq!(kinds, [kind], "{identifier}");
    }
}

#[test]
fn test_scenario_enum_entry_case_conversion() {
    let mut graph = DeclarationGraph::with_builtins();
    let mode = graph.add(
        Declaration::class("com.example.Mode", ClassKind::EnumClass)
            .annotated(BINDING)
            .in_file("Mode.kt"),
    );
    graph.add_enum_entries(mode, &["Option1", "OPTION2", "OPTION_3"]);

    let result = generate(&graph, &GeneratorOptions::default()).unwrap();
    let entries = &result.projection.declaration("SharedMode").unwrap().members;
    let exports: Vec<&str> = entries.iter().map(|entry| entry.export.as_str()).collect();
    assert_eq!(exports, ["option1", "option2", "option3"]);
    assert!(entries.iter().all(|entry| entry.kind == MemberKind::EnumEntry && entry.is_static));
}

#[test]
fn test_scenario_type_alias_emits_only_a_directive() {
    let mut graph = DeclarationGraph::with_builtins();
    let concrete = graph.add(Declaration::class("com.example.Concrete", ClassKind::Class).in_file("Alias.kt"));
    graph.add_type_parameter(concrete, "T", vec![graph.type_ref(names::ANY).nullable()]);
    let alias = graph.add(
        Declaration::type_alias(
            "com.example.Alias",
            TypeRef::new(concrete).with_args([graph.type_ref(names::STRING)]),
        )
        .in_file("Alias.kt"),
    );
    graph.add(
        Declaration::top_level_property("com.example.current", TypeRef::new(alias), false)
            .annotated(BINDING)
            .in_file("Alias.kt"),
    );

    let result = generate(&graph, &GeneratorOptions::default()).unwrap();
    let content = &result.units[0].content;
    assert!(content.contains("  using Alias = Bindings.SharedConcrete;\n"), "{content}");
    let declares = |name: &str| {
        content.lines().any(|line| {
            line.trim_start()
                .strip_prefix("interface ")
                .and_then(|rest| rest.split(' ').next())
                == Some(name)
        })
    };
    assert!(!declares("Alias"));
    assert!(!declares("SharedAlias"));
    assert!(declares("SharedAliasKt"), "{content}");
    assert_eq!(content.matches("interface SharedConcrete ").count(), 1);
    assert!(content.contains("    Alias Current { get; }\n"));
}

fn node_graph(nesting: usize) -> DeclarationGraph {
    let mut graph = DeclarationGraph::with_builtins();
    let node = graph.add(Declaration::class("com.example.Node", ClassKind::Class).in_file("Node.kt"));
    let t = graph.add_type_parameter(node, "T", vec![graph.type_ref(names::ANY).nullable()]);
    graph.add_member(
        node,
        Declaration::property("value", TypeRef::new(t), false).annotated(BINDING),
    );

    let mut ty = graph.type_ref(names::INT);
    for _ in 0..nesting {
        ty = TypeRef::new(node).with_args([ty]);
    }
    graph.add(
        Declaration::top_level_function("com.example.tree", vec![], ty)
            .annotated(BINDING)
            .in_file("Node.kt"),
    );
    graph
}

#[test]
fn test_scenario_self_referential_generic_terminates() {
    let graph = node_graph(2);
    let result = generate(&graph, &GeneratorOptions::default()).unwrap();
    let content = &result.units[0].content;
    assert!(content.contains("    Bindings.SharedNode Tree ();\n"));
    assert!(content.contains("    [Export (\"value\"), NullAllowed]\n    Foundation.NSObject Value { get; }\n"));
}

#[test]
fn test_scenario_artificial_nesting_hits_depth_guard() {
    let graph = node_graph(12);
    let err = generate(&graph, &GeneratorOptions::default()).unwrap_err();
    let bridgec_emitter::GenerateError::Binding(err) = err else {
        panic!("expected a binding error");
    };
    assert!(matches!(err.root_cause(), BindingError::DepthLimitExceeded { limit: 10, .. }), "{err}");
    assert_eq!(err.category(), ErrorCategory::InvariantViolation);
}

// =============================================================================
// Fatal errors
// =============================================================================

#[test]
fn test_unresolved_parameter_type_aborts_without_output() {
    let mut graph = DeclarationGraph::with_builtins();
    let api = graph.add(Declaration::class("com.example.Api", ClassKind::Class).annotated(BINDING).in_file("Api.kt"));
    graph.add_member(
        api,
        Declaration::function("load", vec![Parameter::new("id", TypeRef::error())], graph.type_ref(names::UNIT))
            .annotated(BINDING),
    );
    let err = generate(&graph, &GeneratorOptions::default()).unwrap_err();
    let bridgec_emitter::GenerateError::Binding(err) = err else {
        panic!("expected a binding error");
    };
    assert_eq!(err.category(), ErrorCategory::Resolution);
}

#[test]
fn test_missing_marker_annotation_is_fatal() {
    let graph = DeclarationGraph::with_builtins();
    let options = GeneratorOptions {
        binding_annotation: "com.example.Missing".to_string(),
        ..GeneratorOptions::default()
    };
    let err = generate(&graph, &options).unwrap_err();
    assert!(err.to_string().contains("com.example.Missing"), "{err}");
}

#[test]
fn test_empty_graph_still_emits_foundation() {
    let graph = DeclarationGraph::with_builtins();
    let result = generate(&graph, &GeneratorOptions::default()).unwrap();
    assert!(result.units[0].content.contains("interface SharedBase : ObjCRuntime.INativeObject"));
    assert!(result.projection.declarations.is_empty());
    assert!(result.originating_files.is_empty());
}
