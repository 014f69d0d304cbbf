//! Runtime module for the Scheem language
//!
//! Values, environments, and the evaluator that ties them together.

pub mod environment;
pub mod eval;
pub mod value;

pub use environment::Environment;
pub use eval::{apply, evaluate};
pub use value::{Closure, Primitive, PrimitiveFn, Value};
