//! The parse → evaluate pipeline shared by the CLI, the REPL and the tests.

use std::path::Path;

use tracing::debug;

use crate::prelude::*;
use crate::{
    errors::{SchemeError, SourceContext},
    syntax::parser,
};

// ============================================================================
// PIPELINE ENTRY POINTS
// ============================================================================

/// Parses `source` and evaluates each top-level form in order against `env`.
///
/// Stops at the first failure without returning any partial result. The value
/// of the last form is returned; an empty program yields `()`.
pub fn run_source(source: &str, name: &str, env: &Environment) -> Result<Value, SchemeError> {
    let source_context = SourceContext::from_file(name, source);
    let forms = parser::parse(source, &source_context)?;
    evaluate_forms(&forms, env)
}

/// Evaluates already-parsed top-level forms in order.
pub fn evaluate_forms(forms: &[Expr], env: &Environment) -> Result<Value, SchemeError> {
    let mut last = Value::empty_list();
    for (index, form) in forms.iter().enumerate() {
        last = evaluate(form, env).map_err(|err| {
            debug!(index, form = %form, error = %err, "top-level evaluation failed");
            err
        })?;
    }
    Ok(last)
}

// ============================================================================
// EXECUTION PIPELINE
// ============================================================================

/// A persistent global environment plus the services built on it.
#[derive(Debug, Clone, Default)]
pub struct ExecutionPipeline {
    pub env: Environment,
}

impl ExecutionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `source` in this pipeline's environment. Bindings persist.
    pub fn execute(&self, source: &str, name: &str) -> Result<Value, SchemeError> {
        run_source(source, name, &self.env)
    }

    /// Evaluates an expression tree given in its JSON shape.
    pub fn execute_json(&self, json: &str, name: &str) -> Result<Value, SchemeError> {
        let expr: Expr = serde_json::from_str(json).map_err(|source| SchemeError::Json {
            path: name.to_string(),
            source,
        })?;
        Ok(evaluate(&expr, &self.env)?)
    }

    /// Drops every user binding, keeping only the primitive library.
    pub fn reset(&mut self) {
        self.env = Environment::new();
    }

    /// Parses source text with no evaluation.
    pub fn parse_source(source: &str, name: &str) -> Result<Vec<Expr>, SchemeError> {
        let source_context = SourceContext::from_file(name, source);
        Ok(parser::parse(source, &source_context)?)
    }

    /// Reads a file with standardized error handling.
    pub fn read_file(path: &Path) -> Result<String, SchemeError> {
        std::fs::read_to_string(path).map_err(|source| SchemeError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn forms_share_one_environment() {
        let pipeline = ExecutionPipeline::new();
        pipeline.execute("(define x 5)", "a").unwrap();
        let value = pipeline.execute("(set! x (+ x 1)) x", "b").unwrap();
        assert_eq!(value, Value::Number(6.0));
    }

    #[test]
    fn empty_program_yields_empty_list() {
        let value = run_source("; nothing\n", "empty", &Environment::new()).unwrap();
        assert_eq!(value, Value::empty_list());
    }

    #[test]
    fn first_failure_stops_the_program() {
        let env = Environment::new();
        let err = run_source("(define a 1) (car '()) (define b 2)", "p", &env).unwrap_err();
        assert_eq!(err.eval_kind(), Some(ErrorKind::EmptyListAccess));
        assert!(env.lookup("a").is_ok());
        assert!(env.lookup("b").is_err());
    }

    #[test]
    fn json_trees_evaluate() {
        let pipeline = ExecutionPipeline::new();
        let value = pipeline
            .execute_json(r#"["*", 3, ["+", 2, 2]]"#, "tree.json")
            .unwrap();
        assert_eq!(value, Value::Number(12.0));
    }

    #[test]
    fn reset_forgets_user_bindings() {
        let mut pipeline = ExecutionPipeline::new();
        pipeline.execute("(define x 1)", "a").unwrap();
        pipeline.reset();
        assert!(pipeline.env.lookup("x").is_err());
        assert!(pipeline.env.lookup("+").is_ok());
    }
}
