use super::*;
use murk_value::Unknown;
use pretty_assertions::assert_eq;

fn one(src: &str) -> Value {
    let mut forms = parse(src).unwrap();
    assert_eq!(forms.len(), 1, "expected a single form in {src:?}");
    forms.remove(0)
}

fn error_kind(src: &str) -> ParseErrorKind {
    parse(src).unwrap_err().kind
}

#[test]
fn atoms() {
    assert_eq!(one("42"), Value::int(42));
    assert_eq!(one("#t"), Value::boolean(true));
    assert_eq!(one("#f"), Value::boolean(false));
    assert_eq!(one("nil"), Value::Nil);
    assert_eq!(one(r#""hi\n""#), Value::string("hi\n"));
    assert_eq!(one("foo"), Value::symbol("foo"));
}

#[test]
fn lists_and_dotted_pairs() {
    assert_eq!(one("(+ 1 2)").to_string(), "(+ 1 2)");
    assert_eq!(one("()"), Value::Nil);
    assert_eq!(one("(a (b c) d)").to_string(), "(a (b c) d)");
    assert_eq!(one("(a . b)").to_string(), "(a . b)");
    assert_eq!(one("(a b . (c))").to_string(), "(a b c)");
}

#[test]
fn several_top_level_forms() {
    let forms = parse("(define x 1) ; comment\n x \"s\"").unwrap();
    assert_eq!(forms.len(), 3);
    assert_eq!(forms[1], Value::symbol("x"));
}

#[test]
fn quote_shorthand() {
    assert_eq!(one("'a").to_string(), "(quote a)");
    assert_eq!(one("`(a ,b ,@c)").to_string(), "(quasiquote (a (unquote b) (unquote-splicing c)))");
    assert_eq!(one("''x").to_string(), "(quote (quote x))");
}

#[test]
fn uncertainty_literals() {
    assert!(matches!(one("#unknown").as_unknown(), Some(Unknown::Fully)));
    let any = one("#any-of(1 2 2)");
    match any.as_unknown() {
        Some(Unknown::AnyOf(a)) => assert_eq!(a.len(), 2),
        _ => panic!("expected any-of, got {any}"),
    }
    assert_eq!(one("#any-of(7)"), Value::int(7));
    assert_eq!(one("(f #any-of(1 2))").to_string(), "(f #any-of(1 2))");
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 100_000;
    let src = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let form = one(&src);
    assert!(form.as_cons().is_some());
}

#[test]
fn errors() {
    assert_eq!(error_kind("(a b"), ParseErrorKind::UnterminatedList);
    assert_eq!(error_kind("a)"), ParseErrorKind::UnexpectedCloseParen);
    assert_eq!(error_kind("(. a)"), ParseErrorKind::MisplacedDot);
    assert_eq!(error_kind("(a . )"), ParseErrorKind::MisplacedDot);
    assert_eq!(error_kind("(a . b c)"), ParseErrorKind::MisplacedDot);
    assert_eq!(error_kind("."), ParseErrorKind::MisplacedDot);
    assert_eq!(error_kind("'"), ParseErrorKind::MissingOperand);
    assert_eq!(error_kind("(')"), ParseErrorKind::MissingOperand);
    assert_eq!(error_kind("#any-of()"), ParseErrorKind::EmptyAnyOf);
    assert_eq!(error_kind("\"open"), ParseErrorKind::InvalidToken);
    assert_eq!(error_kind("#zzz"), ParseErrorKind::InvalidToken);
    assert_eq!(error_kind("12abc"), ParseErrorKind::InvalidNumber);
}

#[test]
fn error_positions() {
    let src = "(ok)\n  )";
    let err = parse(src).unwrap_err();
    assert_eq!(err.render("repl", src), "repl:2:3: unexpected `)`");
}
