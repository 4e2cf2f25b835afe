//! One generation invocation, from oracle to output units.

use crate::csharp::CSharpPrinter;
use crate::declarations::DeclarationEmitter;
use crate::naming::BindingNames;
use crate::options::GeneratorOptions;
use crate::projection::MemberProjection;
use bridgec_common::BindingError;
use bridgec_graph::{Analysis, analyze};
use bridgec_model::DeclarationOracle;
use thiserror::Error;
use tracing::{debug, info_span};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error("failed to serialize the member projection")]
    Projection(#[from] serde_json::Error),
}

/// A generated file, relative to the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputUnit {
    pub path: String,
    pub content: String,
}

#[derive(Clone, Debug)]
pub struct GenerationResult {
    /// Definitions file first, then the projection when enabled.
    pub units: Vec<OutputUnit>,
    /// Distinct source files of every emitted declaration.
    pub originating_files: Vec<String>,
    pub projection: MemberProjection,
    pub analysis: Analysis,
}

impl GenerationResult {
    pub fn unit(&self, path: &str) -> Option<&OutputUnit> {
        self.units.iter().find(|unit| unit.path == path)
    }
}

/// Run discovery, emission and printing. Nothing is produced on error.
pub fn generate(oracle: &impl DeclarationOracle, options: &GeneratorOptions) -> Result<GenerationResult, GenerateError> {
    let _span = info_span!("generate", namespace = %options.binding_namespace).entered();

    let analysis = analyze(oracle, &options.binding_annotation, &options.ignore_annotation)?;
    let names = BindingNames::from_options(options);
    let emitted = DeclarationEmitter::new(oracle, &analysis.well_known, &names).emit(&analysis.root)?;

    let mut units = vec![OutputUnit {
        path: options.definitions_path(),
        content: CSharpPrinter::print_file(&emitted.namespace),
    }];
    if options.emit_member_projection {
        let mut content = serde_json::to_string_pretty(&emitted.projection)?;
        content.push('\n');
        units.push(OutputUnit {
            path: options.projection_path(),
            content,
        });
    }

    debug!(
        units = units.len(),
        interfaces = emitted.namespace.interfaces.len(),
        aliases = emitted.namespace.aliases.len(),
        "generation complete"
    );
    Ok(GenerationResult {
        units,
        originating_files: analysis.originating_files.clone(),
        projection: emitted.projection,
        analysis,
    })
}
