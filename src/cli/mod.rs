//! The Scheem Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::Path;
use std::process;
use std::sync::Once;

use clap::Parser;
use termcolor::ColorChoice;

use crate::cli::args::{Command, ScheemArgs};
use crate::engine::ExecutionPipeline;
use crate::errors::SchemeError;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = ScheemArgs::parse();
    init_tracing(args.log.as_deref());
    let choice = output::color_choice(args.color);

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Run { file } => handle_run(&file, choice),
        Command::Eval { expr } => handle_eval(&expr, choice),
        Command::Ast { file, json } => handle_ast(&file, json),
        Command::Json { file } => handle_json(&file, choice),
        Command::Repl => {
            crate::repl::run_repl(choice);
            Ok(())
        }
        Command::ListPrimitives => {
            output::print_primitives(choice);
            Ok(())
        }
    };

    if let Err(e) = result {
        output::print_error(e);
        process::exit(1);
    }
}

/// Installs a stderr `tracing` subscriber when a filter is given on the
/// command line or through `RUST_LOG`. Does nothing otherwise.
pub fn init_tracing(filter: Option<&str>) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match filter {
            Some(directives) => EnvFilter::new(directives),
            None if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            None => return,
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_run(path: &Path, choice: ColorChoice) -> Result<(), SchemeError> {
    let source = ExecutionPipeline::read_file(path)?;
    let value = ExecutionPipeline::new().execute(&source, &path.display().to_string())?;
    output::print_value(&value, choice);
    Ok(())
}

fn handle_eval(expr: &str, choice: ColorChoice) -> Result<(), SchemeError> {
    let value = ExecutionPipeline::new().execute(expr, "<eval>")?;
    output::print_value(&value, choice);
    Ok(())
}

fn handle_ast(path: &Path, json: bool) -> Result<(), SchemeError> {
    let name = path.display().to_string();
    let source = ExecutionPipeline::read_file(path)?;
    let forms = ExecutionPipeline::parse_source(&source, &name)?;
    output::print_forms(&forms, json).map_err(|source| SchemeError::Json { path: name, source })
}

fn handle_json(path: &Path, choice: ColorChoice) -> Result<(), SchemeError> {
    let source = ExecutionPipeline::read_file(path)?;
    let value = ExecutionPipeline::new().execute_json(&source, &path.display().to_string())?;
    output::print_value(&value, choice);
    Ok(())
}
