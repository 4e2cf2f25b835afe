//! Source locations for declarations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position inside a source file, as reported by the declaration oracle.
///
/// Lines and columns are 1-based. A location without a file belongs to a
/// synthetic or library declaration and renders as `<unknown location>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    /// A location with no backing file.
    pub const fn unknown() -> Self {
        Self {
            file: None,
            line: 0,
            column: 0,
        }
    }

    pub fn is_known(&self) -> bool {
        self.file.is_some()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) if self.line > 0 => write!(f, "{}:{}:{}", file, self.line, self.column),
            Some(file) => f.write_str(file),
            None => f.write_str("<unknown location>"),
        }
    }
}
