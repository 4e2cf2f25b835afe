//! `bridgec.json` loading and option resolution.
//!
//! The config file is optional. Command-line flags always win over values
//! read from it; anything left unset falls back to [`GeneratorOptions`]
//! defaults.

use anyhow::{Context, Result, bail};
use bridgec_emitter::GeneratorOptions;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "bridgec.json";

/// Accepts both `true` and `"true"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BridgecConfig {
    #[serde(default)]
    pub binding_prefix: Option<String>,
    #[serde(default)]
    pub binding_namespace: Option<String>,
    #[serde(default)]
    pub binding_annotation: Option<String>,
    #[serde(default)]
    pub ignore_annotation: Option<String>,
    #[serde(default)]
    pub output_file_stem: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub emit_member_projection: Option<bool>,
    /// Relative to the directory holding the config file.
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

/// Options after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    #[serde(flatten)]
    pub options: GeneratorOptions,
    pub out_dir: PathBuf,
}

pub fn parse_config(source: &str) -> Result<BridgecConfig> {
    serde_json::from_str(source).context("failed to parse bridgec.json")
}

/// Locate the config file: `-p` wins, otherwise `bridgec.json` in `cwd` if present.
pub fn resolve_config_path(cwd: &Path, project: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        return Ok(candidate.is_file().then_some(candidate));
    };

    let mut candidate = if project.is_absolute() {
        project.to_path_buf()
    } else {
        cwd.join(project)
    };

    if candidate.is_dir() {
        candidate = candidate.join(CONFIG_FILE_NAME);
    }

    if !candidate.exists() {
        bail!("bridgec.json not found at {}", candidate.display());
    }

    if !candidate.is_file() {
        bail!("project path is not a file: {}", candidate.display());
    }

    Ok(Some(candidate))
}

pub fn load_config(path: Option<&Path>) -> Result<Option<BridgecConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = parse_config(&source).with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(Some(config))
}

/// Merge `args` over `config` over the defaults.
///
/// `config_dir` anchors a configured `outDir`; a flag `--outDir` is taken
/// relative to `cwd`.
pub fn resolve_config(
    args: &CliArgs,
    config: Option<&BridgecConfig>,
    config_dir: &Path,
    cwd: &Path,
) -> ResolvedConfig {
    let config = config.cloned().unwrap_or_default();
    let mut options = GeneratorOptions::default();

    if let Some(prefix) = args.prefix.clone().or(config.binding_prefix) {
        options.binding_prefix = prefix;
    }
    if let Some(namespace) = args.namespace.clone().or(config.binding_namespace) {
        options.binding_namespace = namespace;
    }
    if let Some(annotation) = args.binding_annotation.clone().or(config.binding_annotation) {
        options.binding_annotation = annotation;
    }
    if let Some(annotation) = args.ignore_annotation.clone().or(config.ignore_annotation) {
        options.ignore_annotation = annotation;
    }
    if let Some(stem) = args.output_stem.clone().or(config.output_file_stem) {
        options.output_file_stem = stem;
    }
    if args.no_projection {
        options.emit_member_projection = false;
    } else if let Some(emit) = config.emit_member_projection {
        options.emit_member_projection = emit;
    }

    let out_dir = match (&args.out_dir, config.out_dir) {
        (Some(dir), _) => cwd.join(dir),
        (None, Some(dir)) => config_dir.join(dir),
        (None, None) => cwd.to_path_buf(),
    };

    ResolvedConfig { options, out_dir }
}
