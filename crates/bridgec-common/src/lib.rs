//! Common types and utilities for the bridgec binding compiler.
//!
//! This crate provides foundational types used across all bridgec crates:
//! - Fixed limits (type-mapping depth bound)
//! - Source locations attached to declarations
//! - The fatal error taxonomy (`BindingError`, `ErrorCategory`)

// Centralized limits and thresholds
pub mod limits;

// Line/column source locations
pub mod location;
pub use location::Location;

// Error taxonomy shared by every pipeline stage
pub mod diagnostics;
pub use diagnostics::{BindingError, BindingResult, ErrorCategory};
