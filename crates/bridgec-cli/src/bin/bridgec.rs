#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use bridgec_cli::args::CliArgs;
use bridgec_cli::driver::{RunOutcome, run};
use bridgec_cli::reporter::Reporter;
use bridgec_cli::tracing_config::init_tracing;
use clap::Parser;
use std::io::{IsTerminal, Write};

const EXIT_SUCCESS: i32 = 0;
/// A fatal binding error stopped generation.
const EXIT_BINDING_ERROR: i32 = 1;
/// Bad arguments, unreadable input or unwritable output.
const EXIT_USAGE_ERROR: i32 = 2;

fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse_from(std::env::args_os());
    let pretty = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let reporter = Reporter::new(pretty);
    let outcome = std::env::current_dir()
        .context("failed to read the working directory")
        .and_then(|cwd| run(&args, &cwd));

    match outcome {
        Ok(RunOutcome::Completed { stdout, written }) => {
            let mut out = std::io::stdout().lock();
            out.write_all(stdout.as_bytes())?;
            out.flush()?;
            if !written.is_empty() {
                let paths: Vec<_> = written.iter().map(|path| path.as_path()).collect();
                eprint!("{}", reporter.format_written(&paths));
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Ok(RunOutcome::BindingFailed(err)) => {
            eprintln!("{}", reporter.format_binding_error(&err));
            std::process::exit(EXIT_BINDING_ERROR);
        }
        Err(err) => {
            eprintln!("{}", reporter.format_failure(&err));
            std::process::exit(EXIT_USAGE_ERROR);
        }
    }
}
