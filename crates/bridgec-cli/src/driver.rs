//! One `bridgec` invocation: resolve options, load the graph, generate, write.

use anyhow::{Context, Result};
use bridgec_common::{BindingError, BindingResult};
use bridgec_emitter::{GenerateError, GeneratorOptions, OutputUnit, generate};
use bridgec_graph::analyze;
use bridgec_model::{DeclarationGraph, DeclarationOracle, load_graph};
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use crate::args::CliArgs;
use crate::config::{ResolvedConfig, load_config, resolve_config, resolve_config_path};

/// Result of a run that got past option and input handling.
#[derive(Debug)]
pub enum RunOutcome {
    Completed {
        /// Text for stdout (`--stdout`, `--listDeclarations`, `--showConfig`).
        stdout: String,
        /// Files written to the output directory.
        written: Vec<PathBuf>,
    },
    /// Generation stopped on a fatal error; nothing was written.
    BindingFailed(BindingError),
}

impl RunOutcome {
    fn printed(stdout: String) -> Self {
        RunOutcome::Completed {
            stdout,
            written: Vec::new(),
        }
    }
}

/// Config file and flags merged, relative paths anchored.
pub fn resolve_run_config(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let config_path = resolve_config_path(cwd, args.project.as_deref())?;
    let config = load_config(config_path.as_deref())?;
    let config_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(cwd);
    Ok(resolve_config(args, config.as_ref(), config_dir, cwd))
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunOutcome> {
    let resolved = resolve_run_config(args, cwd)?;
    if args.show_config {
        let mut text = serde_json::to_string_pretty(&resolved).context("failed to serialize configuration")?;
        text.push('\n');
        return Ok(RunOutcome::printed(text));
    }

    let input = args
        .input
        .as_deref()
        .context("no declaration graph given")?;
    let input = cwd.join(input);
    let _span = info_span!("run", input = %input.display()).entered();
    let graph = load_graph(&input)
        .with_context(|| format!("failed to load declaration graph {}", input.display()))?;

    let options = &resolved.options;
    if args.list_declarations {
        return Ok(match list_declarations(&graph, options) {
            Ok(listing) => RunOutcome::printed(listing),
            Err(err) => RunOutcome::BindingFailed(err),
        });
    }

    let result = match generate(&graph, options) {
        Ok(result) => result,
        Err(GenerateError::Binding(err)) => return Ok(RunOutcome::BindingFailed(err)),
        Err(err) => return Err(err).context("generation failed"),
    };

    if args.stdout {
        let definitions = result
            .unit(&options.definitions_path())
            .map(|unit| unit.content.clone())
            .unwrap_or_default();
        return Ok(RunOutcome::printed(definitions));
    }

    let written = write_outputs(&resolved.out_dir, &result.units)?;
    debug!(files = written.len(), out_dir = %resolved.out_dir.display(), "outputs written");
    Ok(RunOutcome::Completed {
        stdout: String::new(),
        written,
    })
}

/// Qualified names of the declarations that receive bindings, one per line.
fn list_declarations(graph: &DeclarationGraph, options: &GeneratorOptions) -> BindingResult<String> {
    let analysis = analyze(graph, &options.binding_annotation, &options.ignore_annotation)?;
    let mut listing = String::new();
    for &id in &analysis.filtered {
        listing.push_str(graph.get(id)?.display_name());
        listing.push('\n');
    }
    Ok(listing)
}

pub(crate) fn write_outputs(out_dir: &Path, units: &[OutputUnit]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = out_dir.join(&unit.path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(&path, &unit.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
