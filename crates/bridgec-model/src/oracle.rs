//! The declaration oracle: the host compiler's read-only reflection surface.
//!
//! The pipeline never owns declarations. It asks an oracle for them by
//! [`DeclId`] and borrows the answers for the length of one invocation.
//! Implementors only provide storage access; the derived queries
//! (super-types, members, origin, alias resolution) are provided methods so
//! every oracle answers them identically.

use crate::decl::{ClassDecl, DeclId, DeclKind, Declaration, Origin};
use crate::types::{TypeArg, TypeRef};
use bridgec_common::{BindingError, BindingResult};

/// Upper bound on alias-to-alias hops when resolving a type alias chain.
const MAX_ALIAS_CHAIN: usize = 32;

pub trait DeclarationOracle {
    /// Declaration stored under `id`, or `None` for unknown ids and the error type.
    fn declaration(&self, id: DeclId) -> Option<&Declaration>;

    /// Declaration with the given qualified name.
    fn lookup(&self, qualified_name: &str) -> Option<DeclId>;

    /// Every declaration carrying `annotation`, in registration order.
    fn symbols_with_annotation(&self, annotation: &str) -> Vec<DeclId>;

    // =========================================================================
    // Provided queries
    // =========================================================================

    fn get(&self, id: DeclId) -> BindingResult<&Declaration> {
        self.declaration(id)
            .ok_or(BindingError::UnknownDeclaration { id: id.0 })
    }

    /// Declared super-types; empty for non-class declarations.
    fn super_types(&self, id: DeclId) -> BindingResult<&[TypeRef]> {
        Ok(match &self.get(id)?.kind {
            DeclKind::Class(ClassDecl { super_types, .. }) => super_types,
            _ => &[],
        })
    }

    /// Declared members; empty for non-class declarations.
    fn members(&self, id: DeclId) -> BindingResult<&[DeclId]> {
        Ok(match &self.get(id)?.kind {
            DeclKind::Class(ClassDecl { members, .. }) => members,
            _ => &[],
        })
    }

    fn origin(&self, id: DeclId) -> BindingResult<Origin> {
        Ok(self.get(id)?.origin)
    }

    fn qualified_name(&self, id: DeclId) -> Option<&str> {
        self.declaration(id)
            .and_then(|decl| decl.qualified_name.as_deref())
    }

    fn parent(&self, id: DeclId) -> Option<DeclId> {
        self.declaration(id).and_then(|decl| decl.parent)
    }

    /// Follow type-alias targets until a non-alias declaration is reached.
    fn resolve_type_aliases(&self, id: DeclId) -> BindingResult<DeclId> {
        let mut current = id;
        for _ in 0..MAX_ALIAS_CHAIN {
            match &self.get(current)?.kind {
                DeclKind::TypeAlias(alias) => current = alias.target.decl,
                _ => return Ok(current),
            }
        }
        let decl = self.get(id)?;
        Err(BindingError::Unsupported {
            construct: "type alias chain".to_string(),
            declaration: decl.display_name().to_string(),
            location: decl.location.clone(),
        })
    }

    /// Render a type reference the way the source would spell it, for diagnostics.
    fn describe_type(&self, ty: &TypeRef) -> String {
        let mut out = match self.declaration(ty.decl) {
            Some(decl) => decl.display_name().to_string(),
            None => "<error>".to_string(),
        };
        if !ty.arguments.is_empty() {
            let args: Vec<String> = ty
                .arguments
                .iter()
                .map(|arg| match arg {
                    TypeArg::Type(inner) => self.describe_type(inner),
                    TypeArg::Star => "*".to_string(),
                })
                .collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        if ty.nullable {
            out.push('?');
        }
        out
    }
}
