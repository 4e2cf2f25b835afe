//! Namespace tree builder.
//!
//! Partitions the filtered declarations by qualified-name segments. At each
//! level the current namespace prefix is stripped from every qualified name;
//! names that still contain a separator go to the child named by their next
//! segment, the rest terminate at the current node.
//!
//! ```text
//! com.example.Person          (root)
//! com.example.Shape             └─ com
//! com.example.Shape.Circle          └─ example: Person, Shape
//!                                       └─ Shape: Circle
//! ```
//!
//! Children and declarations keep first-seen order, so the tree is
//! deterministic for a given input order.

use bridgec_common::{BindingError, BindingResult};
use bridgec_model::{DeclId, DeclarationOracle};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::trace;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceNode {
    /// Last segment of the namespace path; empty for the root.
    pub name: String,
    pub children: Vec<NamespaceNode>,
    /// Declarations whose qualified name terminates at this node.
    pub declarations: Vec<DeclId>,
}

impl NamespaceNode {
    /// Every declaration in the subtree, node first, then children in order.
    pub fn all_declarations(&self) -> Vec<DeclId> {
        let mut out = Vec::new();
        self.walk(&mut |node| out.extend_from_slice(&node.declarations));
        out
    }

    /// Pre-order traversal.
    pub fn walk<'n>(&'n self, visit: &mut impl FnMut(&'n NamespaceNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn child(&self, name: &str) -> Option<&NamespaceNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Follow a dotted path of child names from this node.
    pub fn find(&self, path: &str) -> Option<&NamespaceNode> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| node.child(segment))
    }
}

/// Build the namespace tree for `declarations`. The root has an empty name.
pub fn build_namespace_tree(oracle: &impl DeclarationOracle, declarations: &[DeclId]) -> BindingResult<NamespaceNode> {
    let mut named = Vec::with_capacity(declarations.len());
    for &id in declarations {
        let decl = oracle.get(id)?;
        let qualified_name = decl
            .qualified_name
            .as_deref()
            .ok_or_else(|| BindingError::MissingQualifiedName {
                declaration: decl.name.clone(),
                location: decl.location.clone(),
            })?;
        named.push((id, qualified_name));
    }
    Ok(build_node("", &named))
}

fn build_node(namespace: &str, declarations: &[(DeclId, &str)]) -> NamespaceNode {
    let mut here = Vec::new();
    let mut groups: IndexMap<&str, Vec<(DeclId, &str)>, FxBuildHasher> = IndexMap::default();

    for &(id, qualified_name) in declarations {
        let remaining = strip_namespace(qualified_name, namespace);
        match remaining.split_once('.') {
            Some((segment, _)) => groups.entry(segment).or_default().push((id, qualified_name)),
            None => here.push(id),
        }
    }

    let children = groups
        .into_iter()
        .map(|(segment, group)| {
            let child_namespace = if namespace.is_empty() {
                segment.to_string()
            } else {
                format!("{namespace}.{segment}")
            };
            build_node(&child_namespace, &group)
        })
        .collect();

    let name = namespace.rsplit('.').next().unwrap_or_default().to_string();
    trace!(namespace, declarations = here.len(), "namespace node");
    NamespaceNode {
        name,
        children,
        declarations: here,
    }
}

fn strip_namespace<'q>(qualified_name: &'q str, namespace: &str) -> &'q str {
    if namespace.is_empty() {
        return qualified_name;
    }
    qualified_name
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(qualified_name)
}

#[cfg(test)]
#[path = "tests/namespace_tree_tests.rs"]
mod tests;
