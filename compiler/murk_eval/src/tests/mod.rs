//! Evaluator tests, run through a session so the prelude macros are
//! available.

mod definitions;
mod session;

use murk_value::{EvalErrorKind, Value};

use crate::Session;

/// Evaluate `source` in a fresh session.
fn eval_ok(source: &str) -> Value {
    let session = Session::new().unwrap();
    match session.eval_str(source) {
        Ok(value) => value,
        Err(err) => panic!("`{source}` failed: {err}"),
    }
}

/// Evaluate `source` in a fresh session and print the result.
fn eval_display(source: &str) -> String {
    eval_ok(source).to_string()
}

/// Evaluate `source`, which must fail, and return the error kind.
fn eval_err(source: &str) -> EvalErrorKind {
    let session = Session::new().unwrap();
    match session.eval_str(source) {
        Ok(value) => panic!("`{source}` evaluated to {value}, expected an error"),
        Err(err) => err.kind,
    }
}
