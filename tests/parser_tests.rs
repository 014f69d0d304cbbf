// tests/parser_tests.rs

use scheem::ast::Expr;
use scheem::errors::SourceContext;
use scheem::syntax::{parse, parse_expr};

fn parse_program(text: &str) -> Vec<Expr> {
    parse(text, &SourceContext::from_file("test", text)).unwrap()
}

// ---
// Shapes
// ---

#[test]
fn test_parse_simple_s_expression() {
    let items = parse_program("(+ 1 2)");
    assert_eq!(items.len(), 1);

    if let Expr::List(inner) = &items[0] {
        assert_eq!(inner.len(), 3);
        assert!(matches!(&inner[0], Expr::Symbol(s) if s == "+"));
        assert!(matches!(inner[1], Expr::Number(n) if n == 1.0));
        assert!(matches!(inner[2], Expr::Number(n) if n == 2.0));
    } else {
        panic!("Expected a list at top level");
    }
}

#[test]
fn test_parse_nested_s_expression() {
    let items = parse_program("(+ 1 (* 2 3))");
    assert_eq!(items[0].to_string(), "(+ 1 (* 2 3))");
}

#[test]
fn test_parse_multiple_top_level_forms() {
    let items = parse_program("(define x 1)\n(set! x 2)\nx");
    assert_eq!(items.len(), 3);
    assert_eq!(items[2], Expr::symbol("x"));
}

#[test]
fn test_quote_sugar_expands() {
    assert_eq!(
        parse_expr("'(1 2)").unwrap(),
        Expr::list([
            Expr::symbol("quote"),
            Expr::list([Expr::number(1), Expr::number(2)]),
        ])
    );
    assert_eq!(parse_expr("''a").unwrap().to_string(), "(quote (quote a))");
}

#[test]
fn test_empty_list_parses() {
    assert_eq!(parse_expr("()").unwrap(), Expr::list([]));
}

#[test]
fn test_comments_and_whitespace_are_ignored() {
    let items = parse_program("; leading\n(+ 1 ; inline\n\t 2) ; trailing");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].to_string(), "(+ 1 2)");
}

#[test]
fn test_symbol_characters() {
    for name in ["lambda-one", "set!", "<=", "|no-worries|", "#f", "x1", "-"] {
        assert_eq!(parse_expr(name).unwrap(), Expr::symbol(name), "parsing {name}");
    }
}

#[test]
fn test_numbers() {
    assert_eq!(parse_expr("1024").unwrap(), Expr::number(1024));
    assert_eq!(parse_expr("-101").unwrap(), Expr::number(-101));
    assert_eq!(parse_expr("0.25").unwrap(), Expr::number(0.25));
}

// ---
// JSON tree shape
// ---

#[test]
fn test_tree_json_shape() {
    let expr = parse_expr("(define x '(1 a))").unwrap();
    let json = serde_json::to_string(&expr).unwrap();
    assert_eq!(json, r#"["define","x",["quote",[1.0,"a"]]]"#);

    let back: Expr = serde_json::from_str(r#"["+", 1, ["*", 2, 3]]"#).unwrap();
    assert_eq!(back.to_string(), "(+ 1 (* 2 3))");
}

// ---
// Errors
// ---

#[test]
fn test_unclosed_list_is_an_error() {
    let err = parse("(define x 42", &SourceContext::from_file("t", "(define x 42")).unwrap_err();
    assert_eq!(err.message, "unclosed list");
    assert!(err.help.is_some());
}

#[test]
fn test_extra_close_paren_is_an_error() {
    let text = "(+ 1 2))";
    let err = parse(text, &SourceContext::from_file("t", text)).unwrap_err();
    assert_eq!(err.message, "unexpected ')'");
    assert_eq!(err.span.offset(), 7);
}

#[test]
fn test_parse_expr_rejects_many_forms() {
    let err = parse_expr("1 2").unwrap_err();
    assert!(err.message.contains("found 2"));
    assert!(parse_expr("   ").is_err());
}

#[test]
fn test_dangling_quote_is_an_error() {
    assert!(parse_expr("'").is_err());
}
