//! Special forms: operators that receive their operands unevaluated.
//!
//! | Form | Literal operands |
//! |------|------------------|
//! | `quote`, `quasiquote`, `cond`, `let` | all / binding list |
//! | `lambda` | parameter list |
//! | `defun`, `defmacro` | name and parameter list |
//! | `define`, `defconst`, `set!` | name |
//! | `if`, `and`, `or`, `progn`, `pure`, `macroexpand` | none |
//!
//! Only `set!` is impure. The definition forms write to the root scope but
//! are pure by name, so they are accepted inside `pure`.

mod control;
mod define;
mod quote;

use murk_value::errors::{expected_symbol, malformed_form};
use murk_value::{Arity, Environment, EvalError, Name, Value};

use crate::builtins::register_special_form;

/// Every operand is data.
const ALL: usize = usize::MAX;

pub fn register(env: &Environment) {
    register_special_form(env, "quote", ALL, quote::quote);
    register_special_form(env, "quasiquote", ALL, quote::quasiquote);

    register_special_form(env, "if", 0, control::if_form);
    register_special_form(env, "cond", ALL, control::cond);
    register_special_form(env, "and", 0, control::and);
    register_special_form(env, "or", 0, control::or);
    register_special_form(env, "progn", 0, control::progn);
    register_special_form(env, "let", 1, control::let_form);
    register_special_form(env, "pure", 0, control::pure);
    register_special_form(env, "macroexpand", 0, control::macroexpand);

    register_special_form(env, "lambda", 1, define::lambda);
    register_special_form(env, "defun", 2, define::defun);
    register_special_form(env, "defmacro", 2, define::defmacro);
    register_special_form(env, "define", 1, define::define);
    register_special_form(env, "defconst", 1, define::defconst);
    register_special_form(env, "set!", 1, define::set);
}

/// Check the operand count of a special form.
fn expect_operands(form: &str, arity: Arity, operands: &[Value]) -> Result<(), EvalError> {
    arity.check(form, operands.len())
}

/// A name operand: must be a symbol.
fn name_operand(form: &str, operand: &Value) -> Result<Name, EvalError> {
    operand.as_symbol().ok_or_else(|| {
        let err = expected_symbol(operand);
        malformed_form(form, err.message)
    })
}
