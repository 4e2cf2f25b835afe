//! Fatal error taxonomy for the binding pipeline.
//!
//! Nothing in the pipeline recovers locally: every failure is returned to the
//! invocation boundary as a [`BindingError`] and the invocation produces no
//! output. Errors carry the offending declaration's identity and location so
//! the source model can be fixed.
//!
//! Errors raised while rendering a declaration are wrapped in
//! [`BindingError::InDeclaration`], so a reported chain reads from the
//! outermost declaration down to the failing type.

use crate::location::Location;
use thiserror::Error;

pub type BindingResult<T> = Result<T, BindingError>;

/// Coarse classification used when reporting a [`BindingError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A referenced type could not be resolved by the oracle.
    Resolution,
    /// The declaration or type shape is not covered by the mapping tables.
    UnsupportedConstruct,
    /// An upstream stage broke an invariant the next stage relies on.
    InvariantViolation,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Resolution => "resolution error",
            ErrorCategory::UnsupportedConstruct => "unsupported construct",
            ErrorCategory::InvariantViolation => "invariant violation",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A parameter, return, property or argument type is the error type.
    #[error("Type resolution error: {what} of '{declaration}' at {location}")]
    Unresolved {
        /// Which reference failed, e.g. "return type".
        what: String,
        declaration: String,
        location: Location,
    },

    /// A declaration shape the generator does not support.
    #[error("Unsupported {construct}: '{declaration}' at {location}")]
    Unsupported {
        construct: String,
        declaration: String,
        location: Location,
    },

    /// A declaration kind reached a stage that must never see it.
    #[error("Unexpected {kind} '{declaration}' at {location}: {reason}")]
    UnexpectedDeclaration {
        kind: String,
        declaration: String,
        location: Location,
        reason: String,
    },

    /// A type parameter was substituted but declares no upper bound.
    #[error("Type parameter '{declaration}' at {location} has no upper bound")]
    TypeParameterWithoutBound {
        declaration: String,
        location: Location,
    },

    /// A declaration the generator needs before it starts is absent.
    #[error("Could not find {qualified_name}")]
    MissingWellKnownType { qualified_name: String },

    /// Type mapping recursed past the fixed bound.
    #[error("Depth limit of {limit} reached for type: {ty}")]
    DepthLimitExceeded { ty: String, limit: u32 },

    /// The namespace tree needs a dotted path for every declaration.
    #[error("Declaration '{declaration}' at {location} has no qualified name")]
    MissingQualifiedName {
        declaration: String,
        location: Location,
    },

    /// A top-level function or property reached a per-class renderer.
    #[error("Top-level functions must be generated grouped by file: '{declaration}' at {location}")]
    TopLevelOnly {
        declaration: String,
        location: Location,
    },

    /// A top-level function or property has no originating source file.
    #[error("Top-level declaration '{declaration}' at {location} is not from a source file")]
    MissingContainingFile {
        declaration: String,
        location: Location,
    },

    /// A declaration id does not resolve in the oracle.
    #[error("Unknown declaration id {id}")]
    UnknownDeclaration { id: u32 },

    /// Context wrapper: the inner error happened while processing a declaration.
    #[error("Error processing declaration '{declaration}' at {location}")]
    InDeclaration {
        declaration: String,
        location: Location,
        #[source]
        source: Box<BindingError>,
    },
}

impl BindingError {
    /// Wrap `self` with the declaration being processed.
    pub fn in_declaration(self, declaration: impl Into<String>, location: Location) -> Self {
        BindingError::InDeclaration {
            declaration: declaration.into(),
            location,
            source: Box::new(self),
        }
    }

    /// Category of the innermost error.
    pub fn category(&self) -> ErrorCategory {
        match self.root_cause() {
            BindingError::Unresolved { .. } => ErrorCategory::Resolution,
            BindingError::Unsupported { .. }
            | BindingError::UnexpectedDeclaration { .. }
            | BindingError::TypeParameterWithoutBound { .. }
            | BindingError::MissingWellKnownType { .. } => ErrorCategory::UnsupportedConstruct,
            BindingError::DepthLimitExceeded { .. }
            | BindingError::MissingQualifiedName { .. }
            | BindingError::TopLevelOnly { .. }
            | BindingError::MissingContainingFile { .. }
            | BindingError::UnknownDeclaration { .. }
            | BindingError::InDeclaration { .. } => ErrorCategory::InvariantViolation,
        }
    }

    /// The innermost error, skipping every `InDeclaration` wrapper.
    pub fn root_cause(&self) -> &BindingError {
        let mut current = self;
        while let BindingError::InDeclaration { source, .. } = current {
            current = source;
        }
        current
    }

    /// Iterate from this error down to the root cause.
    pub fn chain(&self) -> impl Iterator<Item = &BindingError> {
        std::iter::successors(Some(self), |err| match err {
            BindingError::InDeclaration { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }
}

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod tests;
