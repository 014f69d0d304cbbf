//! Scheem REPL (Read-Eval-Print Loop)
//!
//! Provides an interactive shell with one global environment that persists
//! across inputs. A failed input is reported and the loop carries on.

use std::io::{self, BufRead, Write};

use termcolor::ColorChoice;

use crate::cli::output::{print_error, print_value};
use crate::engine::ExecutionPipeline;
use crate::errors::SchemeError;
use crate::prelude::*;

/// REPL state that persists across evaluations
#[derive(Debug, Default)]
pub struct ReplState {
    pipeline: ExecutionPipeline,
    line_number: usize,
}

impl ReplState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates one complete input in the persistent environment.
    pub fn eval_input(&mut self, input: &str) -> Result<Value, SchemeError> {
        self.line_number += 1;
        let source_name = format!("<repl:{}>", self.line_number);
        self.pipeline.execute(input, &source_name)
    }

    pub fn env(&self) -> &Environment {
        &self.pipeline.env
    }

    /// Names the user has bound at top level, excluding primitives.
    pub fn user_bindings(&self) -> Vec<(String, Value)> {
        let env = self.env();
        env.names()
            .into_iter()
            .filter_map(|name| {
                let value = env.lookup(&name).ok()?;
                let builtin = matches!(&value, Value::Primitive(p) if p.name == name);
                (!builtin).then_some((name, value))
            })
            .collect()
    }
}

/// Main REPL entry point
pub fn run_repl(choice: ColorChoice) {
    println!("Scheem REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit, :reset to clear all bindings");
    println!();

    let mut state = ReplState::new();
    let mut input_buffer = String::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if input_buffer.is_empty() {
            print!("scheem> ");
        } else {
            print!("     -> ");
        }
        let _ = io::stdout().flush();

        let line = match lines.next() {
            None => {
                // EOF (Ctrl+D)
                println!("\nGoodbye!");
                break;
            }
            Some(Err(e)) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
            Some(Ok(line)) => line,
        };
        let trimmed = line.trim();

        if input_buffer.is_empty() && trimmed.starts_with(':') {
            match handle_repl_command(trimmed, &mut state) {
                ReplCommand::Continue => continue,
                ReplCommand::Quit => break,
            }
        }

        if !input_buffer.is_empty() {
            input_buffer.push('\n');
        }
        input_buffer.push_str(&line);

        if input_buffer.trim().is_empty() {
            input_buffer.clear();
            continue;
        }

        // An empty line forces evaluation of an unfinished input so the parser
        // can report what is missing.
        if is_complete_expression(&input_buffer) || trimmed.is_empty() {
            match state.eval_input(&input_buffer) {
                Ok(value) => print_value(&value, choice),
                Err(err) => print_error(err),
            }
            input_buffer.clear();
        }
    }
}

/// REPL command results
enum ReplCommand {
    Continue,
    Quit,
}

/// Handle special REPL commands that start with ':'
fn handle_repl_command(command: &str, state: &mut ReplState) -> ReplCommand {
    match command.to_ascii_lowercase().as_str() {
        ":help" | ":h" => {
            println!("Scheem REPL Commands:");
            println!("  :help, :h     Show this help");
            println!("  :quit, :q     Exit the REPL");
            println!("  :reset, :r    Forget every user binding");
            println!("  :env, :e      Show user bindings in the global frame");
            println!();
            println!("Enter expressions to evaluate them.");
            println!("Multi-line expressions are supported.");
            ReplCommand::Continue
        }
        ":quit" | ":q" => {
            println!("Goodbye!");
            ReplCommand::Quit
        }
        ":reset" | ":r" => {
            state.pipeline.reset();
            println!("Environment reset.");
            ReplCommand::Continue
        }
        ":env" | ":e" => {
            for (name, value) in state.user_bindings() {
                println!("  {} = {}", name, value);
            }
            ReplCommand::Continue
        }
        _ => {
            println!(
                "Unknown command: {}. Type :help for available commands.",
                command
            );
            ReplCommand::Continue
        }
    }
}

/// Checks whether every `(` in the input has been closed, ignoring comments.
/// A surplus `)` counts as complete so the parser can report it.
fn is_complete_expression(input: &str) -> bool {
    if input.trim().is_empty() {
        return false;
    }

    let mut paren_count: i64 = 0;
    for line in input.lines() {
        let code = line.split(';').next().unwrap_or("");
        for ch in code.chars() {
            match ch {
                '(' => paren_count += 1,
                ')' => paren_count -= 1,
                _ => {}
            }
        }
    }
    paren_count <= 0
}
