//! Reachability collector.
//!
//! Breadth-first closure over the declaration graph, starting from the
//! entry points. Each declaration is expanded at most once, which is what
//! makes cyclic and self-referential graphs terminate:
//!
//! | Declaration | Scheduled dependents |
//! |-------------|----------------------|
//! | class-like | sealed variants, super-types, eligible functions, constructors and properties |
//! | type alias | target type and its generic arguments |
//! | function | parameter types and return type |
//! | property | property type |
//! | type parameter | upper bounds |
//!
//! Scheduling a type schedules its declaration plus, recursively, the
//! declarations of its generic arguments (star projections carry none).
//! Any referenced type that failed to resolve aborts the invocation.

use crate::eligibility::{eligible_functions_and_constructors, eligible_properties};
use crate::entry_points::WellKnownTypes;
use bridgec_common::limits::COLLECTOR_INITIAL_CAPACITY;
use bridgec_common::{BindingError, BindingResult};
use bridgec_model::{ClassDecl, DeclId, DeclKind, Declaration, DeclarationOracle, Modifiers, TypeArg, TypeRef};
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Collected declarations in first-expansion order.
pub type CollectedSet = IndexSet<DeclId, FxBuildHasher>;

/// Work-queue state for one closure computation.
pub struct ReachabilityCollector<'a, O: DeclarationOracle> {
    oracle: &'a O,
    well_known: &'a WellKnownTypes,
    pending: VecDeque<DeclId>,
    seen: FxHashSet<DeclId>,
    collected: CollectedSet,
}

impl<'a, O: DeclarationOracle> ReachabilityCollector<'a, O> {
    pub fn new(oracle: &'a O, well_known: &'a WellKnownTypes) -> Self {
        Self {
            oracle,
            well_known,
            pending: VecDeque::with_capacity(COLLECTOR_INITIAL_CAPACITY),
            seen: FxHashSet::with_capacity_and_hasher(COLLECTOR_INITIAL_CAPACITY, FxBuildHasher),
            collected: CollectedSet::with_capacity_and_hasher(COLLECTOR_INITIAL_CAPACITY, FxBuildHasher),
        }
    }

    /// Run the closure from `entry_points` to a fixed point.
    pub fn run(mut self, entry_points: &[DeclId]) -> BindingResult<CollectedSet> {
        let oracle = self.oracle;
        self.pending.extend(entry_points.iter().copied());

        while let Some(id) = self.pending.pop_front() {
            if !self.seen.insert(id) {
                continue;
            }
            let decl = oracle.get(id)?;
            self.collected.insert(id);
            trace!(name = %decl.display_name(), kind = decl.kind.describe(), "expand declaration");
            self.expand(decl)?;
        }

        debug!(count = self.collected.len(), "reachability closure complete");
        Ok(self.collected)
    }

    fn expand(&mut self, decl: &'a Declaration) -> BindingResult<()> {
        match &decl.kind {
            DeclKind::Class(class) => self.expand_class(decl, class),
            DeclKind::TypeAlias(alias) => self.schedule_type(decl, &alias.target, "type alias target"),
            DeclKind::Function(function) => {
                for param in &function.parameters {
                    self.schedule_type(decl, &param.ty, &format!("type of parameter '{}'", param.name))?;
                }
                if function.is_constructor {
                    return Ok(());
                }
                match &function.return_type {
                    Some(return_type) => self.schedule_type(decl, return_type, "return type"),
                    None => Err(unresolved(decl, "return type")),
                }
            }
            DeclKind::Property(property) => self.schedule_type(decl, &property.ty, "property type"),
            DeclKind::TypeParameter(param) => {
                for bound in &param.bounds {
                    self.schedule_type(decl, bound, "upper bound")?;
                }
                Ok(())
            }
        }
    }

    fn expand_class(&mut self, decl: &'a Declaration, class: &'a ClassDecl) -> BindingResult<()> {
        if decl.modifiers.contains(Modifiers::SEALED) {
            self.pending.extend(class.sealed_subclasses.iter().copied());
        }
        for super_type in &class.super_types {
            self.schedule_type(decl, super_type, "super type")?;
        }
        self.pending
            .extend(eligible_functions_and_constructors(self.oracle, decl.id, self.well_known)?);
        self.pending
            .extend(eligible_properties(self.oracle, decl.id, self.well_known)?);
        Ok(())
    }

    /// Queue the declaration behind `ty` and every generic argument's declaration.
    fn schedule_type(&mut self, owner: &Declaration, ty: &TypeRef, what: &str) -> BindingResult<()> {
        if ty.is_error() || self.oracle.declaration(ty.decl).is_none() {
            return Err(unresolved(owner, what));
        }
        self.pending.push_back(ty.decl);
        for argument in &ty.arguments {
            if let TypeArg::Type(inner) = argument {
                self.schedule_type(owner, inner, what)?;
            }
        }
        Ok(())
    }
}

fn unresolved(decl: &Declaration, what: &str) -> BindingError {
    BindingError::Unresolved {
        what: what.to_string(),
        declaration: decl.display_name().to_string(),
        location: decl.location.clone(),
    }
}

/// Compute the reachability closure of `entry_points`.
pub fn collect(
    oracle: &impl DeclarationOracle,
    well_known: &WellKnownTypes,
    entry_points: &[DeclId],
) -> BindingResult<CollectedSet> {
    ReachabilityCollector::new(oracle, well_known).run(entry_points)
}

#[cfg(test)]
#[path = "tests/collector_tests.rs"]
mod tests;
