use pretty_assertions::assert_eq;

use murk_value::{EvalErrorKind, Value};

use crate::{run, standard_environment, Session};

#[test]
fn session_keeps_definitions_between_runs() {
    let session = Session::new().unwrap();
    session.eval_str("(define counter 1)").unwrap();
    session.eval_str("(set! counter (+ counter 1))").unwrap();
    assert_eq!(session.eval_str("counter").unwrap(), Value::int(2));
}

#[test]
fn macros_apply_to_later_forms_in_one_run() {
    let session = Session::new().unwrap();
    let result = session
        .eval_str("(defmacro inc (x) `(+ ,x 1)) (inc 41)")
        .unwrap();
    assert_eq!(result, Value::int(42));
}

#[test]
fn without_prelude() {
    let session = Session::builder().prelude(false).build().unwrap();
    let err = session.eval_str("(when #t 1)").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnboundVariable {
            name: "when".to_string()
        }
    );
}

#[test]
fn builder_accepts_an_environment() {
    let env = standard_environment();
    run(&env, "setup", b"(define seeded 9)").unwrap();
    let session = Session::builder().env(env).build().unwrap();
    assert_eq!(session.eval_str("seeded").unwrap(), Value::int(9));
}

#[test]
fn parse_errors_carry_label_and_position() {
    let env = standard_environment();
    let err = run(&env, "script.murk", b"(+ 1 2)\n  )").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Parse { .. }));
    assert_eq!(err.to_string(), "script.murk: 2:3: unexpected `)`");
}

#[test]
fn invalid_utf8_is_a_parse_error() {
    let env = standard_environment();
    let err = run(&env, "bytes", &[b'(', 0xff, b')']).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Parse { .. }));
}

#[test]
fn run_returns_last_value() {
    let env = standard_environment();
    assert_eq!(run(&env, "t", b"1 2 3").unwrap(), Value::int(3));
    assert_eq!(run(&env, "t", b"  ; just a comment\n").unwrap(), Value::Nil);
}

#[test]
fn errors_stop_the_run() {
    let env = standard_environment();
    let err = run(&env, "t", b"(define a 1) (car 5) (define b 2)").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    assert!(env.lookup(murk_value::Name::intern("a")).is_some());
    assert!(env.lookup(murk_value::Name::intern("b")).is_none());
}

#[test]
fn deep_recursion_does_not_overflow() {
    let session = Session::new().unwrap();
    let result = session
        .eval_str("(defun count (n) (if (= n 0) 0 (+ 1 (count (- n 1))))) (count 20000)")
        .unwrap();
    assert_eq!(result, Value::int(20000));
}

#[test]
fn tracing_init_is_idempotent() {
    crate::init_tracing();
    crate::init_tracing();
    let session = Session::new().unwrap();
    assert_eq!(session.eval_str("(+ 1 1)").unwrap(), Value::int(2));
}
