//! Tracing setup for the `bridgec` binary.
//!
//! `BRIDGEC_LOG` (or `RUST_LOG`) enables logging with the usual filter
//! syntax; `BRIDGEC_LOG_FORMAT` picks the layout:
//!
//! | Value | Output |
//! |-------|--------|
//! | `text` (default) | flat `tracing-subscriber` lines |
//! | `tree` | indented spans via `tracing-tree` |
//! | `json` | one JSON object per event |
//!
//! ```bash
//! BRIDGEC_LOG=debug BRIDGEC_LOG_FORMAT=tree bridgec model.json
//! BRIDGEC_LOG="bridgec_graph=trace" bridgec model.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "BRIDGEC_LOG";
pub const LOG_FORMAT_ENV: &str = "BRIDGEC_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// `BRIDGEC_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber. No-op unless a log variable is set.
///
/// Everything is written to stderr; stdout carries `--stdout`,
/// `--listDeclarations` and `--showConfig` output.
pub fn init_tracing() {
    if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
