//! Centralized limits for the binding compiler.
//!
//! Every stage of the pipeline is a single synchronous pass, so the only
//! bounded recursion is the type-mapping engine walking nested generic
//! arguments. Exceeding a limit is always a fatal error, never a silent
//! truncation.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth for mapping a source type to a target type.
///
/// Each generic argument, type-parameter bound and collection element adds
/// one level. Real source models stay far below this bound; reaching it means
/// the type expands without end (for example a self-referential generic
/// instantiated with itself).
///
/// # Example
///
/// ```text
/// Node<Node<Int>>                       // depth 2, fine
/// List<List<List<List<List<List<List<List<List<List<Int>>>>>>>>>>
///                                       // depth 10, fatal
/// ```
pub const MAX_TYPE_MAPPING_DEPTH: u32 = 10;

// =============================================================================
// Capacity Hints
// =============================================================================

/// Initial capacity for the collector's work queue and seen-set.
pub const COLLECTOR_INITIAL_CAPACITY: usize = 64;
