use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the bridgec binary.
#[derive(Parser, Debug)]
#[command(
    name = "bridgec",
    version,
    about = "Generate C# API definitions for annotated declarations"
)]
pub struct CliArgs {
    /// Declaration graph (JSON) to generate bindings for.
    #[arg(required_unless_present = "show_config")]
    pub input: Option<PathBuf>,

    // ==================== Command-line Only Options ====================
    /// Path to bridgec.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Print the resolved configuration instead of generating.
    #[arg(long = "showConfig", alias = "show-config")]
    pub show_config: bool,

    /// Print the qualified names of the declarations that receive bindings and stop.
    #[arg(long = "listDeclarations", alias = "list-declarations")]
    pub list_declarations: bool,

    // ==================== Naming ====================
    /// Prefix of every synthesized binding identifier.
    #[arg(long)]
    pub prefix: Option<String>,

    /// C# namespace holding the generated declarations.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Qualified name of the annotation marking entry points.
    #[arg(long = "bindingAnnotation", alias = "binding-annotation")]
    pub binding_annotation: Option<String>,

    /// Qualified name of the annotation excluding declarations.
    #[arg(long = "ignoreAnnotation", alias = "ignore-annotation")]
    pub ignore_annotation: Option<String>,

    // ==================== Output ====================
    /// Directory receiving the output units.
    #[arg(long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// File name (without extension) of the output units.
    #[arg(long = "outputStem", alias = "output-stem")]
    pub output_stem: Option<String>,

    /// Skip the member projection unit.
    #[arg(long = "noProjection", alias = "no-projection")]
    pub no_projection: bool,

    /// Print the C# definitions to stdout instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// Enable color in diagnostics.
    #[arg(long)]
    pub pretty: Option<bool>,
}
