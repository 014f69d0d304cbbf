//! # Comparison Operations
//!
//! Numeric equality and ordering. Results are the boolean tags `#t`/`#f`.

use crate::atoms::helpers::eval_numeric_comparison;
use crate::runtime::PrimitiveFn;

/// Numeric equality.
///
/// Usage: (= <a> <b>)
///
/// Example:
///   (= 3 (- 4 1)) ; => #t
pub const ATOM_EQ: PrimitiveFn = |args| eval_numeric_comparison(args, "=", |a, b| a == b);

/// Usage: (< <a> <b>)
pub const ATOM_LT: PrimitiveFn = |args| eval_numeric_comparison(args, "<", |a, b| a < b);

/// Usage: (> <a> <b>)
pub const ATOM_GT: PrimitiveFn = |args| eval_numeric_comparison(args, ">", |a, b| a > b);

/// Usage: (<= <a> <b>)
pub const ATOM_LTE: PrimitiveFn = |args| eval_numeric_comparison(args, "<=", |a, b| a <= b);

/// Usage: (>= <a> <b>)
pub const ATOM_GTE: PrimitiveFn = |args| eval_numeric_comparison(args, ">=", |a, b| a >= b);
