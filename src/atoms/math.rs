//! # Mathematical Operations
//!
//! All atoms here are pure, take exactly two numbers and return a number.
//!
//! ## Atoms Provided
//!
//! - **Arithmetic**: `+`, `-`, `*`, `/`

use crate::atoms::helpers::{eval_binary_numeric_op, extract_numbers};
use crate::errors::EvalError;
use crate::runtime::{PrimitiveFn, Value};

/// Adds two numbers.
///
/// Usage: (+ <a> <b>)
///
/// Example:
///   (+ 3 5) ; => 8
pub const ATOM_ADD: PrimitiveFn = |args| eval_binary_numeric_op(args, "+", |a, b| a + b);

/// Subtracts the second number from the first.
///
/// Usage: (- <a> <b>)
///
/// Example:
///   (- 4 1) ; => 3
pub const ATOM_SUB: PrimitiveFn = |args| eval_binary_numeric_op(args, "-", |a, b| a - b);

/// Multiplies two numbers.
///
/// Usage: (* <a> <b>)
///
/// Example:
///   (* 3 (+ 2 2)) ; => 12
pub const ATOM_MUL: PrimitiveFn = |args| eval_binary_numeric_op(args, "*", |a, b| a * b);

/// Divides the first number by the second.
///
/// Usage: (/ <a> <b>)
///
/// Example:
///   (/ 9069 3) ; => 3023
///
/// Note: Errors with `DivisionByZero` when `b` is exactly zero.
pub const ATOM_DIV: PrimitiveFn = |args| {
    let (a, b) = extract_numbers(args, "/")?;
    if b == 0.0 {
        return Err(EvalError::DivisionByZero {
            operator: "/".to_string(),
        });
    }
    Ok(Value::Number(a / b))
};
