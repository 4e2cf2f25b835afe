//! Generator options.

use bridgec_model::names;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Prefix of every synthesized binding identifier.
    pub binding_prefix: String,
    /// C# namespace holding the generated declarations.
    pub binding_namespace: String,
    pub binding_annotation: String,
    pub ignore_annotation: String,
    /// File name (without extension) of the output units.
    pub output_file_stem: String,
    /// Also produce the `<stem>.members.json` projection.
    pub emit_member_projection: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            binding_prefix: "Shared".to_string(),
            binding_namespace: "Bindings".to_string(),
            binding_annotation: names::BINDING_ANNOTATION.to_string(),
            ignore_annotation: names::BINDING_IGNORE_ANNOTATION.to_string(),
            output_file_stem: "ApiDefinitions".to_string(),
            emit_member_projection: true,
        }
    }
}

impl GeneratorOptions {
    pub fn definitions_path(&self) -> String {
        format!("{}.cs", self.output_file_stem)
    }

    pub fn projection_path(&self) -> String {
        format!("{}.members.json", self.output_file_stem)
    }
}
