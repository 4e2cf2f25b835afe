//! Type-graph discovery for the bridgec binding compiler.
//!
//! Data flow inside this crate:
//!
//! ```text
//! annotated symbols -> entry points -> collector -> filter -> namespace tree
//! ```
//!
//! Every stage borrows the [`DeclarationOracle`](bridgec_model::DeclarationOracle)
//! and owns only its own working state, so independent invocations never
//! share anything.

pub mod eligibility;
pub use eligibility::{eligible_functions_and_constructors, eligible_properties, is_eligible_member};

pub mod entry_points;
pub use entry_points::{EntryPoints, WellKnownTypes, discover_entry_points};

pub mod collector;
pub use collector::{CollectedSet, ReachabilityCollector, collect};

pub mod filter;
pub use filter::{BUILTIN_ALLOWLIST, filter_declarations};

pub mod namespace_tree;
pub use namespace_tree::{NamespaceNode, build_namespace_tree};

mod analysis;
pub use analysis::{Analysis, analyze};
