//! # Atom Helper Infrastructure
//!
//! Operand extraction shared by all primitives. Every extractor produces the
//! same `TypeError` shape, naming the primitive, the expected type and what was
//! actually passed.

use im::Vector;

use crate::errors::EvalError;
use crate::runtime::Value;

/// Convenient type alias for atom return values
pub type AtomResult = Result<Value, EvalError>;

// ============================================================================
// TRAIT-BASED TYPE EXTRACTION
// ============================================================================

/// Extracts a typed operand from a `Value` with a consistent type error.
pub trait ExtractValue<T> {
    fn extract(&self, name: &str) -> Result<T, EvalError>;
}

impl ExtractValue<f64> for Value {
    fn extract(&self, name: &str) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(type_error(name, "a number", self)),
        }
    }
}

impl ExtractValue<Vector<Value>> for Value {
    fn extract(&self, name: &str) -> Result<Vector<Value>, EvalError> {
        match self {
            Value::List(items) => Ok(items.clone()),
            _ => Err(type_error(name, "a list", self)),
        }
    }
}

// ============================================================================
// ERROR CONSTRUCTION UTILITIES
// ============================================================================

pub fn type_error(name: &str, expected: &str, found: &Value) -> EvalError {
    EvalError::type_mismatch(name, expected, format!("{} {}", found.type_name(), found))
}

// ============================================================================
// TYPE EXTRACTION FUNCTIONS
// ============================================================================

/// Extracts two numbers from a binary primitive's operands.
pub fn extract_numbers(args: &[Value], name: &str) -> Result<(f64, f64), EvalError> {
    let a: f64 = args[0].extract(name)?;
    let b: f64 = args[1].extract(name)?;
    Ok((a, b))
}

/// Extracts the single list operand of a unary list primitive.
pub fn extract_list(args: &[Value], name: &str) -> Result<Vector<Value>, EvalError> {
    args[0].extract(name)
}

// ============================================================================
// OPERATION TEMPLATES
// ============================================================================

/// Applies a binary numeric operation after type checking both operands.
pub fn eval_binary_numeric_op(
    args: &[Value],
    name: &str,
    op: impl FnOnce(f64, f64) -> f64,
) -> AtomResult {
    let (a, b) = extract_numbers(args, name)?;
    Ok(Value::Number(op(a, b)))
}

/// Applies a numeric comparison, producing a boolean tag.
pub fn eval_numeric_comparison(
    args: &[Value],
    name: &str,
    op: impl FnOnce(f64, f64) -> bool,
) -> AtomResult {
    let (a, b) = extract_numbers(args, name)?;
    Ok(Value::Bool(op(a, b)))
}
