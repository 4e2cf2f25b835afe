//! Closure properties checked over generated declaration graphs.
//!
//! Graphs are produced by a small deterministic generator so failures are
//! reproducible from the seed alone.

use bridgec_graph::{WellKnownTypes, collect};
use bridgec_model::{
    ClassKind, DeclId, DeclKind, Declaration, DeclarationGraph, DeclarationOracle, Modifiers, TypeRef, names,
};

/// Linear congruential generator; good enough to shuffle references around.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

/// `classes` data classes, each with a few properties pointing at random
/// classes (self-references and cycles included), some wrapped in lists.
fn generated_graph(seed: u64, classes: usize) -> (DeclarationGraph, Vec<DeclId>) {
    let mut rng = Lcg(seed);
    let mut graph = DeclarationGraph::with_builtins();
    let list = graph.lookup(names::LIST).unwrap();
    let ids: Vec<DeclId> = (0..classes)
        .map(|i| {
            let decl = Declaration::class(&format!("gen.C{i}"), ClassKind::Class).with_modifiers(Modifiers::DATA);
            let decl = if i == 0 {
                decl.annotated(names::BINDING_ANNOTATION)
            } else {
                decl
            };
            graph.add(decl)
        })
        .collect();

    for (i, &owner) in ids.iter().enumerate() {
        for p in 0..rng.next(4) {
            let target = TypeRef::new(ids[rng.next(classes)]).with_nullable(rng.next(2) == 0);
            let ty = if rng.next(3) == 0 {
                TypeRef::new(list).with_args([target])
            } else {
                target
            };
            graph.add_member(owner, Declaration::property(&format!("p{i}_{p}"), ty, false));
        }
    }
    (graph, ids)
}

fn well_known(graph: &DeclarationGraph) -> WellKnownTypes {
    WellKnownTypes::resolve(graph, names::BINDING_ANNOTATION, names::BINDING_IGNORE_ANNOTATION).unwrap()
}

fn referenced(ty: &TypeRef, out: &mut Vec<DeclId>) {
    out.push(ty.decl);
    for arg in ty.type_arguments() {
        referenced(arg, out);
    }
}

#[test]
fn test_closure_is_complete() {
    for seed in 0..32 {
        let (graph, ids) = generated_graph(seed, 12);
        let collected = collect(&graph, &well_known(&graph), &[ids[0]]).unwrap();

        for &id in &collected {
            let decl = graph.get(id).unwrap();
            let mut deps = Vec::new();
            match &decl.kind {
                DeclKind::Class(class) => {
                    class.super_types.iter().for_each(|ty| referenced(ty, &mut deps));
                    deps.extend(class.members.iter().copied());
                }
                DeclKind::Property(property) => referenced(&property.ty, &mut deps),
                _ => {}
            }
            for dep in deps {
                assert!(
                    collected.contains(&dep),
                    "seed {seed}: {} reaches {} which was not collected",
                    decl.display_name(),
                    graph.get(dep).unwrap().display_name()
                );
            }
        }
    }
}

#[test]
fn test_closure_is_idempotent() {
    for seed in 0..32 {
        let (graph, ids) = generated_graph(seed, 10);
        let wk = well_known(&graph);
        let first = collect(&graph, &wk, &[ids[0]]).unwrap();
        let roots: Vec<DeclId> = first.iter().copied().collect();
        let second = collect(&graph, &wk, &roots).unwrap();

        let mut a: Vec<_> = first.into_iter().collect();
        let mut b: Vec<_> = second.into_iter().collect();
        a.sort();
        b.sort();
        assert_eq!(a, b, "seed {seed}");
    }
}

#[test]
fn test_closure_order_is_deterministic() {
    let (graph, ids) = generated_graph(7, 16);
    let wk = well_known(&graph);
    let first = collect(&graph, &wk, &[ids[0]]).unwrap();
    let second = collect(&graph, &wk, &[ids[0]]).unwrap();
    assert!(first.iter().eq(second.iter()));
}

#[test]
fn test_self_referential_generic_terminates() {
    // class Node<T : Any>(val value: T) used only as Node<Node<Int>>
    let mut graph = DeclarationGraph::with_builtins();
    let any = graph.type_ref(names::ANY);
    let int = graph.type_ref(names::INT);
    let node = graph.add(Declaration::class("gen.Node", ClassKind::Class).with_modifiers(Modifiers::DATA));
    let t = graph.add_type_parameter(node, "T", vec![any]);
    graph.add_member(node, Declaration::property("value", TypeRef::new(t), false));
    graph.add_member(node, Declaration::property("next", TypeRef::new(node).with_args([TypeRef::new(t)]).nullable(), false));

    let nested = TypeRef::new(node).with_args([TypeRef::new(node).with_args([int])]);
    let root = graph.add(
        Declaration::top_level_property("gen.root", nested, false).annotated(names::BINDING_ANNOTATION),
    );

    let collected = collect(&graph, &well_known(&graph), &[root]).unwrap();
    assert!(collected.contains(&node));
    assert!(collected.contains(&t));
    assert_eq!(collected.iter().filter(|&&id| id == node).count(), 1);
}
