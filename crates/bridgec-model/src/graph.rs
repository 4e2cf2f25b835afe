//! In-memory declaration oracle.
//!
//! `DeclarationGraph` stores declarations in a flat vector addressed by
//! [`DeclId`] (id `n` lives at index `n - 1`). It backs the JSON loader and
//! the synthetic graphs used in tests.
//!
//! ```text
//! let mut graph = DeclarationGraph::with_builtins();
//! let test = graph.add(Declaration::class("com.example.Test", ClassKind::Class).annotated(BINDING));
//! let int = graph.type_ref(names::INT);
//! graph.add_member(test, Declaration::function("add", vec![Parameter::new("x", int.clone())], int));
//! ```

use crate::decl::{ClassKind, DeclId, DeclKind, Declaration, Modifiers};
use crate::oracle::DeclarationOracle;
use crate::types::TypeRef;
use rustc_hash::FxHashMap;
use tracing::trace;

#[derive(Clone, Debug, Default)]
pub struct DeclarationGraph {
    decls: Vec<Declaration>,
    by_qualified_name: FxHashMap<String, DeclId>,
}

impl DeclarationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph pre-populated with the platform declarations.
    pub fn with_builtins() -> Self {
        let mut graph = Self::new();
        crate::builtins::register(&mut graph);
        graph
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    fn index(id: DeclId) -> Option<usize> {
        id.is_valid().then(|| (id.0 - DeclId::FIRST_VALID) as usize)
    }

    pub fn get_mut(&mut self, id: DeclId) -> Option<&mut Declaration> {
        Self::index(id).and_then(move |i| self.decls.get_mut(i))
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Store a declaration and return its id.
    ///
    /// A declaration with a qualified name is also registered for lookup;
    /// re-registering a name points it at the newest declaration.
    pub fn add(&mut self, mut decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32 + DeclId::FIRST_VALID);
        decl.id = id;
        if let Some(name) = &decl.qualified_name {
            self.by_qualified_name.insert(name.clone(), id);
        }
        trace!(id = id.0, name = %decl.display_name(), kind = decl.kind.describe(), "add declaration");
        self.decls.push(decl);
        id
    }

    /// Attach a member to a class-like owner.
    ///
    /// The member inherits the owner's package and origin, and its file
    /// unless it set one. Its qualified name extends the owner's. The first
    /// constructor attached becomes the primary constructor.
    pub fn add_member(&mut self, owner: DeclId, mut member: Declaration) -> DeclId {
        if let Some(owner_decl) = self.declaration(owner) {
            member.parent = Some(owner);
            member.package = owner_decl.package.clone();
            member.origin = owner_decl.origin;
            if member.containing_file.is_none() {
                member.containing_file = owner_decl.containing_file.clone();
            }
            if member.qualified_name.is_none() {
                member.qualified_name = owner_decl
                    .qualified_name
                    .as_ref()
                    .map(|owner_name| format!("{owner_name}.{}", member.name));
            }
        }
        let is_constructor = member.is_constructor();
        let id = self.add(member);
        if let Some(DeclKind::Class(class)) = self.get_mut(owner).map(|d| &mut d.kind) {
            class.members.push(id);
            if is_constructor && class.primary_constructor.is_none() {
                class.primary_constructor = Some(id);
            }
        }
        id
    }

    /// Attach a secondary (non-primary) constructor.
    pub fn add_secondary_constructor(&mut self, owner: DeclId, constructor: Declaration) -> DeclId {
        let id = self.add_member(owner, constructor);
        if let Some(DeclKind::Class(class)) = self.get_mut(owner).map(|d| &mut d.kind) {
            if class.primary_constructor == Some(id) {
                class.primary_constructor = None;
            }
        }
        id
    }

    /// Declare a generic type parameter on `owner` and return its id.
    pub fn add_type_parameter(&mut self, owner: DeclId, name: &str, bounds: Vec<TypeRef>) -> DeclId {
        let mut param = Declaration::type_parameter(name, bounds);
        param.parent = Some(owner);
        if let Some(owner_decl) = self.declaration(owner) {
            param.package = owner_decl.package.clone();
            param.origin = owner_decl.origin;
            param.containing_file = owner_decl.containing_file.clone();
            param.location = owner_decl.location.clone();
        }
        // Type parameters are scoped; they are not registered by name.
        let id = DeclId(self.decls.len() as u32 + DeclId::FIRST_VALID);
        param.id = id;
        self.decls.push(param);
        if let Some(owner_decl) = self.get_mut(owner) {
            match &mut owner_decl.kind {
                DeclKind::Class(class) => class.type_parameters.push(id),
                DeclKind::TypeAlias(alias) => alias.type_parameters.push(id),
                DeclKind::Function(function) => function.type_parameters.push(id),
                DeclKind::Property(property) => property.type_parameters.push(id),
                DeclKind::TypeParameter(_) => {}
            }
        }
        id
    }

    /// Register `variant` as a variant of the sealed `root`.
    pub fn add_sealed_subclass(&mut self, root: DeclId, variant: DeclId) {
        if let Some(DeclKind::Class(class)) = self.get_mut(root).map(|d| &mut d.kind) {
            class.sealed_subclasses.push(variant);
        }
    }

    pub fn add_super_type(&mut self, id: DeclId, super_type: TypeRef) {
        if let Some(DeclKind::Class(class)) = self.get_mut(id).map(|d| &mut d.kind) {
            class.super_types.push(super_type);
        }
    }

    /// Add enum entries to an enum class.
    pub fn add_enum_entries(&mut self, owner: DeclId, entries: &[&str]) -> Vec<DeclId> {
        entries
            .iter()
            .map(|entry| self.add_member(owner, Declaration::nested_class(entry, ClassKind::EnumEntry)))
            .collect()
    }

    /// Add a companion object to `owner`.
    pub fn add_companion(&mut self, owner: DeclId, name: &str) -> DeclId {
        self.add_member(
            owner,
            Declaration::nested_class(name, ClassKind::Object).with_modifiers(Modifiers::COMPANION),
        )
    }

    // =========================================================================
    // Type references
    // =========================================================================

    /// Non-nullable reference to the declaration named `qualified_name`.
    ///
    /// Unknown names yield the error type.
    pub fn type_ref(&self, qualified_name: &str) -> TypeRef {
        TypeRef::new(self.lookup(qualified_name).unwrap_or(DeclId::INVALID))
    }
}

impl DeclarationOracle for DeclarationGraph {
    fn declaration(&self, id: DeclId) -> Option<&Declaration> {
        Self::index(id).and_then(|i| self.decls.get(i))
    }

    fn lookup(&self, qualified_name: &str) -> Option<DeclId> {
        self.by_qualified_name.get(qualified_name).copied()
    }

    fn symbols_with_annotation(&self, annotation: &str) -> Vec<DeclId> {
        self.decls
            .iter()
            .filter(|decl| decl.has_annotation(annotation))
            .map(|decl| decl.id)
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/graph_tests.rs"]
mod tests;
