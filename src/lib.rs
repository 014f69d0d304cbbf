//! Scheem: a tree-walking evaluator for a small Lisp-family expression language.
//!
//! ```rust
//! use scheem::{evaluate, parse_expr, Environment, Value};
//!
//! let env = Environment::new();
//! let program = parse_expr("(begin (define add (lambda (x y) (+ x y))) (add 1021 3))").unwrap();
//! assert_eq!(evaluate(&program, &env).unwrap(), Value::Number(1024.0));
//! ```

pub use crate::errors::{Arity, ErrorKind, EvalError, ParseError, SchemeError};
pub use crate::runtime::{evaluate, Environment, Value};
pub use crate::syntax::{parse, parse_expr};

pub mod ast;
pub mod atoms;
pub mod cli;
pub mod engine;
pub mod errors;
pub mod repl;
pub mod runtime;
pub mod syntax;

/// Common imports for modules that work with trees and values.
pub mod prelude {
    pub use crate::ast::Expr;
    pub use crate::runtime::{evaluate, Environment, Value};
}
