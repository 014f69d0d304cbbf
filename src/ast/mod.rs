//! AST module for the Scheem language
//!
//! The evaluator consumes an already-parsed expression tree and never mutates
//! it. Atoms are numeric literals or symbol names; everything else is a
//! compound form whose first element names an operator or evaluates to a
//! callable.
//!
//! The serde shape is the untagged one external front ends produce: numbers,
//! strings for symbols, arrays for compound forms.
//!
//! ```rust
//! use scheem::ast::Expr;
//! let expr: Expr = serde_json::from_str(r#"["+", 1, ["*", 2, 3]]"#).unwrap();
//! assert_eq!(expr.to_string(), "(+ 1 (* 2 3))");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Number(f64),
    Symbol(String),
    List(Vec<Expr>),
}

// ============================================================================
// BUILDERS
// ============================================================================

impl Expr {
    pub fn number(n: impl Into<f64>) -> Self {
        Expr::Number(n.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn list(items: impl IntoIterator<Item = Expr>) -> Self {
        Expr::List(items.into_iter().collect())
    }

    /// `(quote <expr>)`
    pub fn quote(expr: Expr) -> Self {
        Expr::List(vec![Expr::symbol("quote"), expr])
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Number(_) => "number",
            Expr::Symbol(_) => "symbol",
            Expr::List(_) => "list",
        }
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

/// Formats a number the way the language prints it: integral values drop the
/// fractional part.
pub(crate) fn fmt_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => fmt_number(f, *n),
            Expr::Symbol(s) => f.write_str(s),
            Expr::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_canonical_sexpr() {
        let expr = Expr::list([
            Expr::symbol("define"),
            Expr::symbol("x"),
            Expr::list([Expr::symbol("-"), Expr::number(2.5), Expr::number(-3)]),
        ]);
        assert_eq!(expr.to_string(), "(define x (- 2.5 -3))");
    }

    #[test]
    fn json_tree_matches_historical_shape() {
        let expr: Expr = serde_json::from_str(r#"["cdr", ["quote", [1, 2, 3, 4]]]"#).unwrap();
        assert_eq!(
            expr,
            Expr::list([
                Expr::symbol("cdr"),
                Expr::quote(Expr::list([
                    Expr::number(1),
                    Expr::number(2),
                    Expr::number(3),
                    Expr::number(4),
                ])),
            ])
        );
        assert_eq!(
            serde_json::to_string(&Expr::list([Expr::symbol("+"), Expr::number(1.5)])).unwrap(),
            r#"["+",1.5]"#
        );
    }
}
