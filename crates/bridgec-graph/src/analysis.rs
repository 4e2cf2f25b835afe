use crate::collector::{CollectedSet, collect};
use crate::entry_points::{EntryPoints, WellKnownTypes, discover_entry_points};
use crate::filter::filter_declarations;
use crate::namespace_tree::{NamespaceNode, build_namespace_tree};
use bridgec_common::BindingResult;
use bridgec_model::{DeclId, DeclarationOracle};
use indexmap::IndexSet;
use tracing::debug;

/// Everything the discovery half of the pipeline produces for one invocation.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub well_known: WellKnownTypes,
    pub entry_points: EntryPoints,
    pub collected: CollectedSet,
    pub filtered: Vec<DeclId>,
    pub root: NamespaceNode,
    /// Distinct source files of the filtered declarations, first-seen order.
    pub originating_files: Vec<String>,
}

/// Resolve well-known types, discover entry points, close, filter and group.
pub fn analyze(
    oracle: &impl DeclarationOracle,
    binding_annotation: &str,
    ignore_annotation: &str,
) -> BindingResult<Analysis> {
    let well_known = WellKnownTypes::resolve(oracle, binding_annotation, ignore_annotation)?;
    let entry_points = discover_entry_points(oracle, &well_known)?;
    let collected = collect(oracle, &well_known, &entry_points.roots())?;
    let filtered = filter_declarations(oracle, &collected)?;
    let root = build_namespace_tree(oracle, &filtered)?;

    let mut files = IndexSet::new();
    for &id in &filtered {
        if let Some(file) = &oracle.get(id)?.containing_file {
            files.insert(file.clone());
        }
    }
    let originating_files: Vec<String> = files.into_iter().collect();

    debug!(
        entry_points = entry_points.roots().len(),
        collected = collected.len(),
        filtered = filtered.len(),
        files = originating_files.len(),
        "analysis complete"
    );
    Ok(Analysis {
        well_known,
        entry_points,
        collected,
        filtered,
        root,
        originating_files,
    })
}
