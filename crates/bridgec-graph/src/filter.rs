//! Declaration filter.
//!
//! Narrows the reachability closure to the declarations that need a
//! generated binding. Rules apply in order:
//!
//! 1. builtins with a hard-coded target mapping are dropped
//! 2. declarations not authored in the source project are dropped
//! 3. functions and properties are kept only at top level
//! 4. type parameters are always dropped

use crate::collector::CollectedSet;
use bridgec_common::BindingResult;
use bridgec_model::{DeclId, DeclKind, DeclarationOracle, Origin, names};
use tracing::{debug, trace};

/// Builtins that map to fixed target types and never get a declaration.
pub const BUILTIN_ALLOWLIST: &[&str] = &[
    names::ANY,
    names::BOOLEAN,
    names::BYTE,
    names::CHAR,
    names::DOUBLE,
    names::FLOAT,
    names::INT,
    names::LONG,
    names::NUMBER,
    names::SHORT,
    names::STRING,
    names::UNIT,
    names::LIST,
    names::MAP,
    names::SET,
    names::ENUM,
];

/// Apply the filter rules, preserving collection order.
pub fn filter_declarations(oracle: &impl DeclarationOracle, collected: &CollectedSet) -> BindingResult<Vec<DeclId>> {
    let mut kept = Vec::with_capacity(collected.len());
    for &id in collected {
        let decl = oracle.get(id)?;
        let builtin = decl
            .qualified_name
            .as_deref()
            .is_some_and(|name| BUILTIN_ALLOWLIST.contains(&name));
        let keep = !builtin
            && decl.origin == Origin::Source
            && match &decl.kind {
                DeclKind::Class(_) | DeclKind::TypeAlias(_) => true,
                DeclKind::Function(_) | DeclKind::Property(_) => decl.parent.is_none(),
                DeclKind::TypeParameter(_) => false,
            };
        if keep {
            kept.push(id);
        } else {
            trace!(name = %decl.display_name(), kind = decl.kind.describe(), "filtered out");
        }
    }
    debug!(collected = collected.len(), kept = kept.len(), "filtered declarations");
    Ok(kept)
}
