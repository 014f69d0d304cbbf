//! Scheem Error Handling
//!
//! Every failure the engine can produce is one of three things: the surface
//! parser rejected the text (`ParseError`), evaluation of a well-formed tree
//! failed (`EvalError`), or the pipeline could not read its input. All of them
//! are `miette` diagnostics so the CLI and REPL render them the same way.
//!
//! Evaluation errors are never recovered locally. The first failure aborts the
//! whole top-level expression and travels back to the caller unchanged.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// ARITY DESCRIPTION
// ============================================================================

/// The operand count a form, primitive, or closure accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

// ============================================================================
// EVALUATION ERRORS
// ============================================================================

/// Type-safe classification of evaluation failures.
///
/// Tests and embedders that only care about the category match on this
/// instead of on rendered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Arity,
    Type,
    UnboundVariable,
    DivisionByZero,
    EmptyListAccess,
    UnknownOperator,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Arity => "ArityError",
            ErrorKind::Type => "TypeError",
            ErrorKind::UnboundVariable => "UnboundVariable",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::EmptyListAccess => "EmptyListAccess",
            ErrorKind::UnknownOperator => "UnknownOperator",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed evaluation. Carries the offending operator or variable name and,
/// where it applies, what was expected versus what was found.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum EvalError {
    #[error("'{form}' expects {expected} operand(s), {actual} given")]
    #[diagnostic(
        code(scheem::eval::arity),
        help("check the number of operands passed to '{form}'")
    )]
    Arity {
        form: String,
        expected: Arity,
        actual: usize,
    },

    #[error("'{form}' expects {expected}, found {found}")]
    #[diagnostic(code(scheem::eval::type_error))]
    Type {
        form: String,
        expected: String,
        found: String,
    },

    #[error("unbound variable '{name}'")]
    #[diagnostic(
        code(scheem::eval::unbound_variable),
        help("bind it first with (define {name} ...)")
    )]
    UnboundVariable { name: String },

    #[error("'{operator}' expects a non-zero divisor")]
    #[diagnostic(code(scheem::eval::division_by_zero))]
    DivisionByZero { operator: String },

    #[error("'{operator}' expects a non-empty list")]
    #[diagnostic(code(scheem::eval::empty_list_access))]
    EmptyListAccess { operator: String },

    #[error("unknown operator '{operator}'")]
    #[diagnostic(
        code(scheem::eval::unknown_operator),
        help("the head of a form must be a special form, a primitive, or a procedure")
    )]
    UnknownOperator { operator: String },
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Arity { .. } => ErrorKind::Arity,
            EvalError::Type { .. } => ErrorKind::Type,
            EvalError::UnboundVariable { .. } => ErrorKind::UnboundVariable,
            EvalError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            EvalError::EmptyListAccess { .. } => ErrorKind::EmptyListAccess,
            EvalError::UnknownOperator { .. } => ErrorKind::UnknownOperator,
        }
    }

    pub fn arity(form: impl Into<String>, expected: Arity, actual: usize) -> Self {
        EvalError::Arity {
            form: form.into(),
            expected,
            actual,
        }
    }

    pub fn type_mismatch(
        form: impl Into<String>,
        expected: impl Into<String>,
        found: impl fmt::Display,
    ) -> Self {
        EvalError::Type {
            form: form.into(),
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        EvalError::UnboundVariable { name: name.into() }
    }

    pub fn unknown_operator(operator: impl fmt::Display) -> Self {
        EvalError::UnknownOperator {
            operator: operator.to_string(),
        }
    }
}

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// The surface parser rejected its input.
#[derive(Debug, Error, Diagnostic)]
#[error("parse error: {message}")]
#[diagnostic(code(scheem::parse))]
pub struct ParseError {
    pub message: String,
    #[source_code]
    pub source_code: Arc<NamedSource<String>>,
    #[label("{message}")]
    pub span: SourceSpan,
    #[help]
    pub help: Option<String>,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        source: &SourceContext,
        span: impl Into<SourceSpan>,
    ) -> Self {
        Self {
            message: message.into(),
            source_code: source.to_named_source(),
            span: span.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Names a piece of source text for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// PIPELINE ERRORS
// ============================================================================

/// Anything that can stop the parse → evaluate pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum SchemeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),

    #[error("cannot read '{path}'")]
    #[diagnostic(code(scheem::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed expression tree in '{path}'")]
    #[diagnostic(
        code(scheem::json),
        help("trees are JSON numbers, strings (symbols) and arrays (forms)")
    )]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SchemeError {
    /// The evaluation error kind, when this is an evaluation failure.
    pub fn eval_kind(&self) -> Option<ErrorKind> {
        match self {
            SchemeError::Eval(e) => Some(e.kind()),
            _ => None,
        }
    }
}
