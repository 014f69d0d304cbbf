//! Scheem Parser
//!
//! Converts source text into expression trees. Purely syntactic: no special
//! form is checked here, so `(if 1)` parses fine and fails at evaluation.

use pest::{error::Error, iterators::Pair, Parser};
use pest_derive::Parser;

use crate::ast::Expr;
use crate::errors::{ParseError, SourceContext};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct ScheemParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses a whole program into its top-level expressions.
pub fn parse(source_text: &str, source_context: &SourceContext) -> Result<Vec<Expr>, ParseError> {
    let mut pairs = ScheemParser::parse(Rule::program, source_text)
        .map_err(|e| convert_parse_error(e, source_text, source_context))?;

    let Some(program) = pairs.next() else {
        return Ok(vec![]);
    };

    program
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| build_expr(p, source_context))
        .collect()
}

/// Parses text that must hold exactly one expression.
pub fn parse_expr(source_text: &str) -> Result<Expr, ParseError> {
    let source = SourceContext::from_file("<expr>", source_text);
    let mut exprs = parse(source_text, &source)?;
    match exprs.len() {
        1 => Ok(exprs.remove(0)),
        0 => Err(ParseError::new("expected an expression", &source, (0, 0))),
        n => Err(ParseError::new(
            format!("expected one expression, found {}", n),
            &source,
            (0, source_text.len()),
        )
        .with_help("wrap several expressions in (begin ...)")),
    }
}

/// Turns a multi-form program into a single `(begin ...)`.
pub fn wrap_in_begin(mut exprs: Vec<Expr>) -> Option<Expr> {
    match exprs.len() {
        0 => None,
        1 => exprs.pop(),
        _ => {
            let mut items = Vec::with_capacity(exprs.len() + 1);
            items.push(Expr::symbol("begin"));
            items.extend(exprs);
            Some(Expr::List(items))
        }
    }
}

// ============================================================================
// AST BUILDERS
// ============================================================================

fn build_expr(pair: Pair<Rule>, source: &SourceContext) -> Result<Expr, ParseError> {
    let (start, end) = (pair.as_span().start(), pair.as_span().end());

    match pair.as_rule() {
        Rule::number => {
            let text = pair.as_str();
            let value = text.parse::<f64>().map_err(|_| {
                ParseError::new(format!("invalid number '{}'", text), source, (start, end - start))
            })?;
            Ok(Expr::Number(value))
        }

        Rule::symbol => Ok(Expr::symbol(pair.as_str())),

        Rule::list => {
            let children: Result<Vec<_>, _> =
                pair.into_inner().map(|p| build_expr(p, source)).collect();
            Ok(Expr::List(children?))
        }

        Rule::quoted => {
            let inner = pair.into_inner().next().ok_or_else(|| {
                ParseError::new("expected an expression after '", source, (start, end - start))
            })?;
            Ok(Expr::quote(build_expr(inner, source)?))
        }

        rule => Err(ParseError::new(
            format!("unsupported rule: {:?}", rule),
            source,
            (start, end - start),
        )),
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(error: Error<Rule>, text: &str, source: &SourceContext) -> ParseError {
    if let Some((message, offset)) = find_unbalanced_paren(text) {
        let help = if message.starts_with("unclosed") {
            "add the missing ')'"
        } else {
            "remove the extra ')'"
        };
        return ParseError::new(message, source, (offset, 1)).with_help(help);
    }

    let (start, len) = match error.location {
        pest::error::InputLocation::Pos(pos) => (pos, 0),
        pest::error::InputLocation::Span((start, end)) => (start, end - start),
    };
    ParseError::new(error.variant.message().into_owned(), source, (start, len))
}

/// Finds the first stray `)` or the last unclosed `(`, skipping comments.
fn find_unbalanced_paren(text: &str) -> Option<(&'static str, usize)> {
    let mut open = Vec::new();
    let mut in_comment = false;
    for (offset, ch) in text.char_indices() {
        match ch {
            '\n' => in_comment = false,
            _ if in_comment => {}
            ';' => in_comment = true,
            '(' => open.push(offset),
            ')' => {
                if open.pop().is_none() {
                    return Some(("unexpected ')'", offset));
                }
            }
            _ => {}
        }
    }
    open.pop().map(|offset| ("unclosed list", offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(text: &str) -> SourceContext {
        SourceContext::from_file("test", text)
    }

    #[test]
    fn empty_input_is_an_empty_program() {
        assert!(parse("", &src("")).unwrap().is_empty());
        assert!(parse("  ; only a comment\n", &src("")).unwrap().is_empty());
    }

    #[test]
    fn numbers_and_symbols() {
        assert_eq!(parse_expr("42").unwrap(), Expr::number(42));
        assert_eq!(parse_expr("-3.5").unwrap(), Expr::number(-3.5));
        assert_eq!(parse_expr("-").unwrap(), Expr::symbol("-"));
        assert_eq!(parse_expr("1+").unwrap(), Expr::symbol("1+"));
        assert_eq!(parse_expr("set!").unwrap(), Expr::symbol("set!"));
        assert_eq!(parse_expr("#t").unwrap(), Expr::symbol("#t"));
    }

    #[test]
    fn unmatched_paren_is_reported_at_the_open_paren() {
        let err = parse("(a (b c)", &src("(a (b c)")).unwrap_err();
        assert_eq!(err.message, "unclosed list");
        assert_eq!(err.span.offset(), 0);
    }

    #[test]
    fn stray_close_paren_is_reported() {
        let err = parse("(a))", &src("(a))")).unwrap_err();
        assert_eq!(err.message, "unexpected ')'");
        assert_eq!(err.span.offset(), 3);
    }

    #[test]
    fn wrap_in_begin_only_wraps_many() {
        assert_eq!(wrap_in_begin(vec![]), None);
        assert_eq!(wrap_in_begin(vec![Expr::number(1)]), Some(Expr::number(1)));
        assert_eq!(
            wrap_in_begin(vec![Expr::number(1), Expr::number(2)]).unwrap().to_string(),
            "(begin 1 2)"
        );
    }
}
