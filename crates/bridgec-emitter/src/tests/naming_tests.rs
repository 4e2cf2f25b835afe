use super::*;
use bridgec_model::{ClassKind, DeclarationGraph, Parameter, names};

fn function(graph: &DeclarationGraph, name: &str, params: &[&str]) -> Declaration {
    let parameters = params
        .iter()
        .map(|param| Parameter::new(*param, graph.type_ref(names::STRING)))
        .collect();
    Declaration::function(name, parameters, graph.type_ref(names::UNIT))
}

fn export_of(decl: &Declaration) -> String {
    let function = decl.as_function().unwrap();
    export_name(decl, function)
}

#[test]
fn test_capitalize_and_decapitalize() {
    assert_eq!(capitalize("name"), "Name");
    assert_eq!(capitalize(""), "");
    assert_eq!(capitalize("OPTION_3"), "OPTION_3");
    assert_eq!(decapitalize("Unknown"), "unknown");
    assert_eq!(decapitalize(""), "");
}

#[test]
fn test_method_export_name_appends_parameter_labels() {
    let graph = DeclarationGraph::with_builtins();
    let method = function(&graph, "methodName", &["name", "age"]);
    assert_eq!(export_of(&method), "methodNameName:age:");
    assert_eq!(export_of(&function(&graph, "refresh", &[])), "refresh");
}

#[test]
fn test_constructor_export_names() {
    let graph = DeclarationGraph::with_builtins();
    let empty = Declaration::constructor(vec![]);
    let with_args = Declaration::constructor(vec![
        Parameter::new("name", graph.type_ref(names::STRING)),
        Parameter::new("age", graph.type_ref(names::INT)),
    ]);
    assert_eq!(export_of(&empty), "init");
    assert_eq!(export_of(&with_args), "initWithName:age:");
}

#[test]
fn test_reserved_names_rewrite_only_the_base() {
    let graph = DeclarationGraph::with_builtins();
    assert_eq!(export_of(&function(&graph, "description", &[])), "description_");
    assert_eq!(export_of(&function(&graph, "initialize", &["force"])), "doInitializeForce:");
    // `default` is only reserved for declarations other than functions and properties.
    assert_eq!(export_of(&function(&graph, "default", &[])), "default");
    assert_eq!(objc_name(&Declaration::nested_class("DEFAULT", ClassKind::EnumEntry)), "DEFAULT_");

    let property = Declaration::property("description", graph.type_ref(names::STRING), false);
    assert_eq!(objc_name(&property), "description_");
}

#[test]
fn test_enum_entry_export_names() {
    let export = |name: &str| enum_entry_export_name(&Declaration::nested_class(name, ClassKind::EnumEntry));
    assert_eq!(export("Option1"), "option1");
    assert_eq!(export("OPTION2"), "option2");
    assert_eq!(export("OPTION_3"), "option3");
    assert_eq!(export("LONG_ENTRY_NAME"), "longEntryName");
    assert_eq!(export("DOUBLE__UNDERSCORE"), "double_Underscore");
    assert_eq!(export("TRAILING_"), "trailing_");
}

#[test]
fn test_object_accessor_export_name() {
    let object = Declaration::class("com.example.Unknown", ClassKind::Object);
    assert_eq!(object_accessor_export_name(&object), "unknown");
}

#[test]
fn test_file_container_names() {
    assert_eq!(file_container_name("E2ETest.kt"), "E2ETestKt");
    assert_eq!(file_container_name("src/commonMain/api.kt"), "ApiKt");
    assert_eq!(file_container_name("Api.android.kt"), "ApiAndroidKt");

    let names = BindingNames::new("Shared", "Bindings");
    assert_eq!(names.file_container("E2ETest.kt"), "SharedE2ETestKt");
}

#[test]
fn test_binding_identifiers_include_enclosing_declarations() {
    let mut graph = DeclarationGraph::with_builtins();
    let person = graph.add(Declaration::class("com.example.Person", ClassKind::Class));
    let companion = graph.add_companion(person, "Companion");
    let names = BindingNames::new("Shared", "Bindings");

    assert_eq!(names.identifier(&graph, person).unwrap(), "SharedPerson");
    assert_eq!(names.identifier(&graph, companion).unwrap(), "SharedPersonCompanion");
    assert!(names.identifier(&graph, bridgec_model::DeclId(9999)).is_err());
}

#[test]
fn test_binding_names_from_options() {
    let options = GeneratorOptions {
        binding_prefix: "Core".to_string(),
        binding_namespace: "CoreBindings".to_string(),
        ..GeneratorOptions::default()
    };
    let names = BindingNames::from_options(&options);
    assert_eq!(names.base(), ClassName::new("CoreBindings", "CoreBase"));
    assert_eq!(names.unit(), ClassName::new("CoreBindings", "CoreKotlinUnit"));
    assert_eq!(names.prefixed("KotlinEnum"), "CoreKotlinEnum");
}
