//! Syntax module for the Scheem language
//!
//! The surface reader that turns program text into `ast::Expr` trees. The
//! evaluator does not depend on it; any front end that builds the same trees
//! works.

pub mod parser;

pub use parser::{parse, parse_expr, wrap_in_begin};
