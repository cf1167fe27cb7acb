use pretty_assertions::assert_eq;

use murk_value::{EvalErrorKind, Value};

use super::{eval_display, eval_err, eval_ok};

#[test]
fn defun_and_call() {
    assert_eq!(
        eval_ok("(defun square (x) (* x x)) (square 7)"),
        Value::int(49)
    );
    assert_eq!(eval_ok("(defun f () 1)"), Value::symbol("f"));
}

#[test]
fn recursion() {
    let source = "
        (defun fact (n) (if (<= n 1) 1 (* n (fact (- n 1)))))
        (fact 25)";
    assert_eq!(eval_display(source), "15511210043330985984000000");
}

#[test]
fn closures_capture_their_scope() {
    let source = "
        (defun adder (n) (lambda (x) (+ x n)))
        (define add5 (adder 5))
        (add5 10)";
    assert_eq!(eval_ok(source), Value::int(15));
    assert_eq!(eval_ok("((lambda (a b) (- a b)) 10 3)"), Value::int(7));
}

#[test]
fn optional_parameters() {
    let source = "(defun f (a &optional (b 10) c) (list a b c))";
    assert_eq!(eval_display(&format!("{source} (f 1)")), "(1 10 nil)");
    assert_eq!(eval_display(&format!("{source} (f 1 2 3)")), "(1 2 3)");
    assert!(matches!(
        eval_err(&format!("{source} (f)")),
        EvalErrorKind::ArityMismatch { min: 1, max: Some(3), got: 0, .. }
    ));
}

#[test]
fn optional_defaults_see_earlier_parameters() {
    assert_eq!(
        eval_ok("(defun f (a &optional (b (* a 2))) b) (f 4)"),
        Value::int(8)
    );
}

#[test]
fn rest_parameters() {
    assert_eq!(eval_display("(defun g (a &rest r) r) (g 1 2 3)"), "(2 3)");
    assert_eq!(eval_ok("(defun g (a &rest r) r) (g 1)"), Value::Nil);
    assert_eq!(eval_display("(defun h (a . r) (list a r)) (h 1 2)"), "(1 (2))");
    assert_eq!(eval_display("((lambda args args) 1 2)"), "(1 2)");
}

#[test]
fn bad_lambda_lists() {
    assert!(matches!(
        eval_err("(lambda (a a) a)"),
        EvalErrorKind::InvalidLambdaList { .. }
    ));
    assert!(matches!(
        eval_err("(lambda (1) 1)"),
        EvalErrorKind::InvalidLambdaList { .. }
    ));
}

#[test]
fn user_macros() {
    let source = "
        (defmacro swap! (a b)
          `(let ((tmp ,a)) (set! ,a ,b) (set! ,b tmp)))
        (define x 1)
        (define y 2)
        (swap! x y)
        (list x y)";
    assert_eq!(eval_display(source), "(2 1)");
}

#[test]
fn macros_expand_at_definition_time() {
    // Redefining `twice` later does not change `f`, which was expanded when
    // it was defined.
    let source = "
        (defmacro twice (x) `(* 2 ,x))
        (defun f (n) (twice n))
        (defmacro twice (x) `(* 3 ,x))
        (f 5)";
    assert_eq!(eval_ok(source), Value::int(10));
}

#[test]
fn set_updates_existing_bindings() {
    assert_eq!(eval_ok("(define x 1) (set! x 2) x"), Value::int(2));
    assert_eq!(
        eval_ok("(define x 1) (let ((x 5)) (set! x 6)) x"),
        Value::int(1)
    );
    assert_eq!(
        eval_err("(set! never-defined 1)"),
        EvalErrorKind::UnboundVariable {
            name: "never-defined".to_string()
        }
    );
}

#[test]
fn constants_cannot_change() {
    assert_eq!(eval_ok("(defconst limit 3) limit"), Value::int(3));
    assert_eq!(
        eval_err("(defconst limit 3) (set! limit 4)"),
        EvalErrorKind::ImmutableBinding {
            name: "limit".to_string()
        }
    );
    assert_eq!(
        eval_err("(defconst limit 3) (define limit 4)"),
        EvalErrorKind::ImmutableBinding {
            name: "limit".to_string()
        }
    );
}

#[test]
fn define_replaces_mutable_bindings() {
    assert_eq!(eval_ok("(define x 1) (define x 2) x"), Value::int(2));
}

#[test]
fn malformed_definitions() {
    assert!(matches!(
        eval_err("(defun 5 () 1)"),
        EvalErrorKind::MalformedForm { .. }
    ));
    assert!(matches!(
        eval_err("(define x)"),
        EvalErrorKind::ArityMismatch { .. }
    ));
}
