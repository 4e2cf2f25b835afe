//! Platform declarations every graph starts with.
//!
//! The type-mapping tables key on these qualified names, so a graph built
//! from a partial source model still resolves primitives, collections,
//! function types and the calendar value types. All of them are
//! library-origin declarations and never receive generated bindings.

use crate::decl::{ClassKind, DeclId, DeclKind, Declaration};
use crate::graph::DeclarationGraph;
use crate::names;
use crate::types::TypeRef;

const PRIMITIVES: &[&str] = &[
    names::BOOLEAN,
    names::BYTE,
    names::CHAR,
    names::DOUBLE,
    names::FLOAT,
    names::INT,
    names::LONG,
    names::SHORT,
    names::STRING,
];

const VALUE_TYPES: &[&str] = &[
    names::THROWABLE,
    names::DURATION,
    names::INSTANT,
    names::LOCAL_DATE,
    names::LOCAL_TIME,
    names::LOCAL_DATE_TIME,
];

/// Register the builtins into `graph`.
pub fn register(graph: &mut DeclarationGraph) {
    let any = graph.add(Declaration::class(names::ANY, ClassKind::Class).library());
    let any_ref = TypeRef::new(any);
    let nullable_any = TypeRef::new(any).nullable();

    let number = add_library_class(graph, names::NUMBER, ClassKind::Class, &any_ref);
    for name in PRIMITIVES {
        let id = add_library_class(graph, name, ClassKind::Class, &any_ref);
        if *name != names::BOOLEAN && *name != names::STRING && *name != names::CHAR {
            graph.add_super_type(id, TypeRef::new(number));
        }
    }
    add_library_class(graph, names::UNIT, ClassKind::Object, &any_ref);

    let comparable = add_library_class(graph, names::COMPARABLE, ClassKind::Interface, &any_ref);
    graph.add_type_parameter(comparable, "T", vec![nullable_any.clone()]);

    let enum_base = add_library_class(graph, names::ENUM, ClassKind::Class, &any_ref);
    let enum_param = graph.add_type_parameter(enum_base, "E", Vec::new());
    if let Some(DeclKind::TypeParameter(param)) =
        graph.get_mut(enum_param).map(|decl| &mut decl.kind)
    {
        param.bounds.push(TypeRef::new(enum_base).with_args([TypeRef::new(enum_param)]));
    }
    graph.add_super_type(
        enum_base,
        TypeRef::new(comparable).with_args([TypeRef::new(enum_param)]),
    );

    for name in VALUE_TYPES {
        add_library_class(graph, name, ClassKind::Class, &any_ref);
    }

    for (name, params) in [(names::LIST, &["E"][..]), (names::SET, &["E"]), (names::MAP, &["K", "V"])] {
        let id = add_library_class(graph, name, ClassKind::Interface, &any_ref);
        for param in params {
            graph.add_type_parameter(id, param, vec![nullable_any.clone()]);
        }
    }

    for arity in 0..=names::MAX_FUNCTION_ARITY {
        for name in [names::function_type(arity), names::suspend_function_type(arity)] {
            let id = add_library_class(graph, &name, ClassKind::Interface, &any_ref);
            for index in 1..=arity {
                graph.add_type_parameter(id, &format!("P{index}"), vec![nullable_any.clone()]);
            }
            graph.add_type_parameter(id, "R", vec![nullable_any.clone()]);
        }
    }

    for annotation in [names::BINDING_ANNOTATION, names::BINDING_IGNORE_ANNOTATION] {
        graph.add(Declaration::class(annotation, ClassKind::Annotation).library());
    }
}

fn add_library_class(
    graph: &mut DeclarationGraph,
    qualified_name: &str,
    kind: ClassKind,
    any: &TypeRef,
) -> DeclId {
    graph.add(
        Declaration::class(qualified_name, kind)
            .library()
            .with_super_types(vec![any.clone()]),
    )
}
