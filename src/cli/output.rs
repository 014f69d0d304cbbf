//! Handles all user-facing output for the CLI.
//!
//! Results, primitive listings and errors all go through here so every command
//! looks the same.

use std::io::{IsTerminal, Write};

use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::args::ColorMode;
use crate::errors::SchemeError;
use crate::prelude::*;

// ============================================================================
// COLOR SELECTION
// ============================================================================

/// Resolves `--color` against whether stdout is a terminal.
pub fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    }
}

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints an evaluation result.
pub fn print_value(value: &Value, choice: ColorChoice) {
    let mut stdout = StandardStream::stdout(choice);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = writeln!(stdout, "{}", value);
    let _ = stdout.reset();
}

/// Prints a parsed program, one top-level form per line.
pub fn print_forms(forms: &[Expr], json: bool) -> Result<(), serde_json::Error> {
    for form in forms {
        if json {
            println!("{}", serde_json::to_string(form)?);
        } else {
            println!("{}", form);
        }
    }
    Ok(())
}

/// Prints the primitive table.
pub fn print_primitives(choice: ColorChoice) {
    let mut stdout = StandardStream::stdout(choice);
    for primitive in crate::atoms::PRIMITIVES {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = write!(stdout, "{:<6}", primitive.name);
        let _ = stdout.reset();
        let _ = writeln!(stdout, " {} operand(s)", primitive.arity);
    }
}

/// Renders an error as a miette diagnostic on stderr.
pub fn print_error(error: SchemeError) {
    eprintln!("{:?}", Report::new(error));
}
