//! Special forms: operators whose operands are not evaluated up front.
//!
//! They are keywords, recognized only as a bare symbol in head position, and
//! each one checks its own operand count before doing anything else.

use std::collections::HashSet;
use std::rc::Rc;

use tracing::debug;

use crate::ast::Expr;
use crate::errors::{Arity, EvalError};
use crate::runtime::eval::evaluate;
use crate::runtime::{Closure, Environment, Value};

/// The fixed set of special forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    Quote,
    Define,
    Set,
    Begin,
    If,
    Lambda,
    LambdaOne,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 7] = [
        SpecialForm::Quote,
        SpecialForm::Define,
        SpecialForm::Set,
        SpecialForm::Begin,
        SpecialForm::If,
        SpecialForm::Lambda,
        SpecialForm::LambdaOne,
    ];

    pub fn from_symbol(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|form| form.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecialForm::Quote => "quote",
            SpecialForm::Define => "define",
            SpecialForm::Set => "set!",
            SpecialForm::Begin => "begin",
            SpecialForm::If => "if",
            SpecialForm::Lambda => "lambda",
            SpecialForm::LambdaOne => "lambda-one",
        }
    }

    /// Number of operands after the keyword.
    pub fn arity(&self) -> Arity {
        match self {
            SpecialForm::Quote => Arity::Exactly(1),
            SpecialForm::Define | SpecialForm::Set => Arity::Exactly(2),
            SpecialForm::Begin => Arity::AtLeast(1),
            SpecialForm::If => Arity::Exactly(3),
            SpecialForm::Lambda | SpecialForm::LambdaOne => Arity::Exactly(2),
        }
    }

    /// Evaluates the form with `args` being everything after the keyword.
    pub fn evaluate(self, args: &[Expr], env: &Environment) -> Result<Value, EvalError> {
        if !self.arity().accepts(args.len()) {
            return Err(EvalError::arity(self.name(), self.arity(), args.len()));
        }
        match self {
            SpecialForm::Quote => Ok(Value::from_datum(&args[0])),
            SpecialForm::Define => eval_define(&args[0], &args[1], env),
            SpecialForm::Set => eval_set(&args[0], &args[1], env),
            SpecialForm::Begin => eval_begin(args, env),
            SpecialForm::If => eval_if(&args[0], &args[1], &args[2], env),
            SpecialForm::Lambda => {
                let params = lambda_params(&args[0])?;
                Ok(make_closure(params, &args[1], env))
            }
            SpecialForm::LambdaOne => {
                let param = binding_name(self, &args[0])?;
                Ok(make_closure(vec![param.to_string()], &args[1], env))
            }
        }
    }
}

// ============================================================================
// BINDING FORMS
// ============================================================================

fn binding_name(form: SpecialForm, target: &Expr) -> Result<&str, EvalError> {
    target
        .as_symbol()
        .ok_or_else(|| EvalError::type_mismatch(form.name(), "a symbol", target))
}

/// `(define name expr)`: binds in the current frame, never searching outward.
fn eval_define(target: &Expr, value_expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    let name = binding_name(SpecialForm::Define, target)?;
    let value = evaluate(value_expr, env)?;
    debug!(name, value = %value, "define");
    env.define(name, value);
    Ok(Value::symbol(name))
}

/// `(set! name expr)`: mutates the nearest existing binding, failing when
/// there is none.
fn eval_set(target: &Expr, value_expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    let name = binding_name(SpecialForm::Set, target)?;
    let value = evaluate(value_expr, env)?;
    debug!(name, value = %value, "set!");
    env.assign(name, value)?;
    Ok(Value::symbol(name))
}

// ============================================================================
// CONTROL FORMS
// ============================================================================

/// `(begin e1 e2 ...)`: evaluates left to right, keeping only the last value.
fn eval_begin(body: &[Expr], env: &Environment) -> Result<Value, EvalError> {
    let (last, init) = body
        .split_last()
        .ok_or_else(|| EvalError::arity("begin", Arity::AtLeast(1), 0))?;
    for expr in init {
        evaluate(expr, env)?;
    }
    evaluate(last, env)
}

/// `(if c then else)`: the condition must be a boolean tag, and only the
/// chosen branch is evaluated.
fn eval_if(
    condition: &Expr,
    then_branch: &Expr,
    else_branch: &Expr,
    env: &Environment,
) -> Result<Value, EvalError> {
    let cond_val = evaluate(condition, env)?;
    let Value::Bool(is_true) = cond_val else {
        return Err(EvalError::type_mismatch(
            "if",
            "#t or #f as its condition",
            format!("{} {}", cond_val.type_name(), cond_val),
        ));
    };
    let branch = if is_true { then_branch } else { else_branch };
    evaluate(branch, env)
}

// ============================================================================
// PROCEDURE FORMS
// ============================================================================

fn lambda_params(param_list: &Expr) -> Result<Vec<String>, EvalError> {
    let Expr::List(items) = param_list else {
        return Err(EvalError::type_mismatch(
            "lambda",
            "a parameter list",
            param_list,
        ));
    };
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| {
            let name = binding_name(SpecialForm::Lambda, item)?;
            if !seen.insert(name) {
                return Err(EvalError::type_mismatch(
                    "lambda",
                    "distinct parameter names",
                    format!("duplicate '{}'", name),
                ));
            }
            Ok(name.to_string())
        })
        .collect()
}

/// Captures `env` by reference; the body is not evaluated here.
fn make_closure(params: Vec<String>, body: &Expr, env: &Environment) -> Value {
    Value::Closure(Rc::new(Closure {
        params,
        body: Rc::new(body.clone()),
        env: env.clone(),
    }))
}
