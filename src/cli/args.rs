//! Defines the command-line arguments and subcommands for the Scheem CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "scheem",
    version,
    about = "A small, lexically scoped Lisp-family expression language."
)]
pub struct ScheemArgs {
    /// Log filter in `tracing` syntax (e.g. `scheem=trace`). Overrides RUST_LOG.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    /// When to colorize output.
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse and evaluate every form in a script, printing the last value.
    Run {
        /// The path to the Scheem script file to run.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Evaluate an expression given on the command line.
    Eval {
        /// The expression text, e.g. "(+ 1 2)".
        #[arg(required = true)]
        expr: String,
    },
    /// Show the parsed expression tree for a script.
    Ast {
        /// The path to the Scheem script file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// Print the tree in its JSON shape instead of S-expressions.
        #[arg(long)]
        json: bool,
    },
    /// Evaluate an expression tree stored as JSON.
    Json {
        /// The path to the JSON tree.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Start an interactive session.
    Repl,
    /// List all primitives with their arities.
    ListPrimitives,
}
