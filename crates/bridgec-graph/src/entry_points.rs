//! Well-known types and entry-point discovery.
//!
//! Entry points are the declarations carrying the binding marker. Before the
//! closure is computed they are validated: generic binding functions and
//! properties are rejected, and member functions must live in a class-like
//! declaration. Member functions are not roots of the closure themselves;
//! the collector reaches them through their owning class.

use bridgec_common::{BindingError, BindingResult, Location};
use bridgec_model::{DeclId, DeclKind, DeclarationOracle, names};
use tracing::debug;

/// Declarations every invocation needs before it starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    /// Qualified name of the binding marker annotation.
    pub binding_annotation: String,
    /// Qualified name of the ignore marker annotation.
    pub ignore_annotation: String,
    /// The universal root type.
    pub any: DeclId,
}

impl WellKnownTypes {
    /// Resolve the marker annotations and the root type through the oracle.
    pub fn resolve(
        oracle: &impl DeclarationOracle,
        binding_annotation: &str,
        ignore_annotation: &str,
    ) -> BindingResult<Self> {
        let require = |qualified_name: &str| {
            oracle
                .lookup(qualified_name)
                .ok_or_else(|| BindingError::MissingWellKnownType {
                    qualified_name: qualified_name.to_string(),
                })
        };
        require(binding_annotation)?;
        require(ignore_annotation)?;
        let any = require(names::ANY)?;
        Ok(Self {
            binding_annotation: binding_annotation.to_string(),
            ignore_annotation: ignore_annotation.to_string(),
            any,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryPoints {
    pub classes: Vec<DeclId>,
    pub top_level_functions: Vec<DeclId>,
    pub top_level_properties: Vec<DeclId>,
    /// Annotated functions and constructors declared inside a class.
    pub member_functions: Vec<DeclId>,
    /// Annotated properties declared inside a class.
    pub member_properties: Vec<DeclId>,
}

impl EntryPoints {
    /// Roots of the reachability closure, in discovery order.
    pub fn roots(&self) -> Vec<DeclId> {
        self.classes
            .iter()
            .chain(&self.top_level_functions)
            .chain(&self.top_level_properties)
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.top_level_functions.is_empty() && self.top_level_properties.is_empty()
    }
}

/// Find and validate every declaration carrying the binding marker.
pub fn discover_entry_points(
    oracle: &impl DeclarationOracle,
    well_known: &WellKnownTypes,
) -> BindingResult<EntryPoints> {
    let mut entry_points = EntryPoints::default();

    for id in oracle.symbols_with_annotation(&well_known.binding_annotation) {
        let decl = oracle.get(id)?;
        let unsupported = |construct: &str| BindingError::Unsupported {
            construct: construct.to_string(),
            declaration: decl.display_name().to_string(),
            location: decl.location.clone(),
        };

        match &decl.kind {
            DeclKind::Class(_) => entry_points.classes.push(id),
            DeclKind::Function(function) => {
                if !function.is_constructor && !function.type_parameters.is_empty() {
                    return Err(unsupported("type parameters on a binding function"));
                }
                match decl.parent {
                    None => entry_points.top_level_functions.push(id),
                    Some(parent) => {
                        require_class_parent(oracle, parent, decl.display_name(), &decl.location)?;
                        entry_points.member_functions.push(id);
                    }
                }
            }
            DeclKind::Property(property) => {
                if !property.type_parameters.is_empty() {
                    return Err(unsupported("type parameters on a binding property"));
                }
                match decl.parent {
                    None => entry_points.top_level_properties.push(id),
                    Some(parent) => {
                        require_class_parent(oracle, parent, decl.display_name(), &decl.location)?;
                        entry_points.member_properties.push(id);
                    }
                }
            }
            DeclKind::TypeAlias(_) | DeclKind::TypeParameter(_) => {
                return Err(unsupported(&format!("annotated {}", decl.kind.describe())));
            }
        }
    }

    debug!(
        classes = entry_points.classes.len(),
        functions = entry_points.top_level_functions.len(),
        properties = entry_points.top_level_properties.len(),
        members = entry_points.member_functions.len() + entry_points.member_properties.len(),
        "discovered entry points"
    );
    Ok(entry_points)
}

fn require_class_parent(
    oracle: &impl DeclarationOracle,
    parent: DeclId,
    declaration: &str,
    location: &Location,
) -> BindingResult<()> {
    match &oracle.get(parent)?.kind {
        DeclKind::Class(_) => Ok(()),
        other => Err(BindingError::UnexpectedDeclaration {
            kind: other.describe().to_string(),
            declaration: declaration.to_string(),
            location: location.clone(),
            reason: "binding members must be declared in a class, object or at top level".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/entry_points_tests.rs"]
mod tests;
