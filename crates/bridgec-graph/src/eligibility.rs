//! Member eligibility.
//!
//! A declared member of a class takes part in the binding surface when it is
//! neither `internal` nor `private`, when the owner is a `data` class or the
//! member carries the binding marker, and when it does not carry the ignore
//! marker. The ignore marker always wins.

use crate::entry_points::WellKnownTypes;
use bridgec_common::BindingResult;
use bridgec_model::{DeclId, DeclKind, Declaration, DeclarationOracle, Modifiers};

pub fn is_eligible_member(owner: &Declaration, member: &Declaration, well_known: &WellKnownTypes) -> bool {
    !member.modifiers.intersects(Modifiers::INTERNAL | Modifiers::PRIVATE)
        && (owner.modifiers.contains(Modifiers::DATA) || member.has_annotation(&well_known.binding_annotation))
        && !member.has_annotation(&well_known.ignore_annotation)
}

fn eligible_members_where(
    oracle: &impl DeclarationOracle,
    owner: DeclId,
    well_known: &WellKnownTypes,
    keep: impl Fn(&DeclKind) -> bool,
) -> BindingResult<Vec<DeclId>> {
    let owner_decl = oracle.get(owner)?;
    let mut eligible = Vec::new();
    for &member in oracle.members(owner)? {
        let member_decl = oracle.get(member)?;
        if keep(&member_decl.kind) && is_eligible_member(owner_decl, member_decl, well_known) {
            eligible.push(member);
        }
    }
    Ok(eligible)
}

/// Eligible functions and constructors of `owner`, in declaration order.
pub fn eligible_functions_and_constructors(
    oracle: &impl DeclarationOracle,
    owner: DeclId,
    well_known: &WellKnownTypes,
) -> BindingResult<Vec<DeclId>> {
    eligible_members_where(oracle, owner, well_known, |kind| matches!(kind, DeclKind::Function(_)))
}

/// Eligible properties of `owner`, in declaration order.
pub fn eligible_properties(
    oracle: &impl DeclarationOracle,
    owner: DeclId,
    well_known: &WellKnownTypes,
) -> BindingResult<Vec<DeclId>> {
    eligible_members_where(oracle, owner, well_known, |kind| matches!(kind, DeclKind::Property(_)))
}
