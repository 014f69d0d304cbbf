//! Runtime values produced by evaluation.
//!
//! Lists are persistent `im::Vector`s, so `cons` and `cdr` share structure with
//! their operands instead of copying them.

use std::fmt;
use std::rc::Rc;

use im::Vector;

use crate::ast::{fmt_number, Expr};
use crate::errors::{Arity, EvalError};
use crate::runtime::environment::Environment;

/// Native function signature for primitives. Operands arrive already
/// evaluated and already arity-checked.
pub type PrimitiveFn = fn(args: &[Value]) -> Result<Value, EvalError>;

/// Canonical runtime value.
#[derive(Clone)]
pub enum Value {
    Number(f64),
    /// A symbolic atom; only produced by `quote` and by `define`/`set!`.
    Symbol(String),
    /// The boolean tags `#t` and `#f`.
    Bool(bool),
    List(Vector<Value>),
    Closure(Rc<Closure>),
    Primitive(Primitive),
}

/// A user-defined procedure: parameters, body and the frame it was created in.
///
/// The frame is captured by reference. Two closures made in the same frame see
/// each other's `set!`s.
pub struct Closure {
    pub params: Vec<String>,
    pub body: Rc<Expr>,
    pub env: Environment,
}

impl Closure {
    pub fn arity(&self) -> Arity {
        Arity::Exactly(self.params.len())
    }
}

impl fmt::Debug for Closure {
    // The captured frame can reach this closure again; never print it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// A built-in operation with a fixed arity.
#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    pub arity: Arity,
    pub func: PrimitiveFn,
}

impl Primitive {
    /// Checks arity, then runs the operation. Type checks live in `func`.
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        if !self.arity.accepts(args.len()) {
            return Err(EvalError::arity(self.name, self.arity, args.len()));
        }
        (self.func)(args)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Primitive(a), Value::Primitive(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn empty_list() -> Self {
        Value::List(Vector::new())
    }

    /// Returns the type name of the value, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Symbol(_) => "symbol",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Closure(_) => "procedure",
            Value::Primitive(_) => "primitive",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vector<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Primitive(_))
    }

    /// Converts quoted source into data. The tags `#t`/`#f` become booleans,
    /// every other symbol stays a symbol.
    pub fn from_datum(expr: &Expr) -> Self {
        match expr {
            Expr::Number(n) => Value::Number(*n),
            Expr::Symbol(s) => match s.as_str() {
                "#t" => Value::TRUE,
                "#f" => Value::FALSE,
                _ => Value::Symbol(s.clone()),
            },
            Expr::List(items) => Value::List(items.iter().map(Value::from_datum).collect()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(f, *n),
            Value::Symbol(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("#t"),
            Value::Bool(false) => f.write_str("#f"),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
            Value::Closure(c) => write!(f, "#<closure ({})>", c.params.join(" ")),
            Value::Primitive(p) => write!(f, "#<primitive {}>", p.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Closure(c) => fmt::Debug::fmt(c.as_ref(), f),
            Value::Primitive(p) => fmt::Debug::fmt(p, f),
            other => write!(f, "{}", other),
        }
    }
}
