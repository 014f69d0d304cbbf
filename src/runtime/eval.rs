//! This module provides the core evaluation engine for Scheem expressions,
//! turning expression trees into runtime values against a lexical environment.
//!
//! ## Dispatch
//!
//! - Numbers evaluate to themselves; `#t`/`#f` to the boolean tags.
//! - Any other symbol is looked up through the environment chain.
//! - A compound form whose head is a special-form keyword is handed to that
//!   form, which decides what to evaluate.
//! - Every other compound form is an application: the head is evaluated to a
//!   callable, then each operand left to right, then the callable is applied.
//!
//! ## Scoping
//!
//! Applying a closure creates exactly one frame, and its parent is the frame
//! the closure captured, never the caller's. That is what makes scoping
//! lexical.
//!
//! There is no recursion limit. A runaway user recursion exhausts the native
//! stack.

use tracing::trace;

use crate::ast::Expr;
use crate::atoms::special_forms::SpecialForm;
use crate::errors::EvalError;
use crate::runtime::environment::Environment;
use crate::runtime::value::Value;

// ===================================================================================================
// PUBLIC API: Expression Evaluation Interface
// ===================================================================================================

/// Evaluates `expr` in `env`.
///
/// Failures are never recovered here: the first error aborts the whole
/// expression and is returned as is.
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Symbol(name) => evaluate_symbol(name, env),
        Expr::List(items) => evaluate_list(items, env),
    }
}

/// Applies a callable to already-evaluated arguments.
///
/// `operator` names the callee in diagnostics.
pub fn apply(callee: &Value, args: Vec<Value>, operator: &str) -> Result<Value, EvalError> {
    trace!(operator, argc = args.len(), "apply");
    match callee {
        Value::Primitive(primitive) => primitive.call(&args),
        Value::Closure(closure) => {
            let frame = closure
                .env
                .extend(closure.params.iter().cloned(), args, operator)?;
            evaluate(&closure.body, &frame)
        }
        other => Err(EvalError::unknown_operator(other)),
    }
}

// ===================================================================================================
// INTERNAL HELPERS: Expression-Specific Evaluation
// ===================================================================================================

fn evaluate_symbol(name: &str, env: &Environment) -> Result<Value, EvalError> {
    match name {
        "#t" => Ok(Value::TRUE),
        "#f" => Ok(Value::FALSE),
        _ => env.lookup(name),
    }
}

fn evaluate_list(items: &[Expr], env: &Environment) -> Result<Value, EvalError> {
    let Some((head, tail)) = items.split_first() else {
        return Err(EvalError::unknown_operator("()"));
    };

    if let Some(form) = head.as_symbol().and_then(SpecialForm::from_symbol) {
        return form.evaluate(tail, env);
    }

    let callee = evaluate_operator(head, env)?;
    let args = evaluate_args(tail, env)?;
    apply(&callee, args, &head.to_string())
}

/// Evaluates the head of an application. An unbound name here is an unknown
/// operator rather than an unbound variable.
fn evaluate_operator(head: &Expr, env: &Environment) -> Result<Value, EvalError> {
    let callee = match head {
        Expr::Symbol(name) => evaluate_symbol(name, env).map_err(|err| match err {
            EvalError::UnboundVariable { name } => EvalError::UnknownOperator { operator: name },
            other => other,
        })?,
        other => evaluate(other, env)?,
    };
    if !callee.is_callable() {
        return Err(EvalError::unknown_operator(head));
    }
    Ok(callee)
}

/// Evaluates operands strictly left to right.
fn evaluate_args(args: &[Expr], env: &Environment) -> Result<Vec<Value>, EvalError> {
    args.iter().map(|arg| evaluate(arg, env)).collect()
}
