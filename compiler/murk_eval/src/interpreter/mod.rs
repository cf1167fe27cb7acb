//! Tree-walking evaluator.
//!
//! # Evaluation rules
//!
//! - A symbol evaluates to its innermost binding.
//! - A cons is a call form. Its head is evaluated to find the operator:
//!   - special form: receives the unevaluated operands;
//!   - macro: expands with the unevaluated operands, then the expansion is
//!     evaluated in the same environment;
//!   - function or builtin: operands are evaluated left to right, then applied;
//!   - anything else: not callable.
//! - Every other value evaluates to itself.
//!
//! Impure operators (names ending in `!`) are refused in pure environments
//! before they run.

mod call;

pub use call::{apply, bind_parameters, call_lambda, check_purity, expand_macro};

use murk_value::errors::{not_callable, unbound_variable};
use murk_value::{ensure_sufficient_stack, Cons, Environment, EvalError, EvalResult, Value};

/// Evaluate one form.
pub fn eval(env: &Environment, form: &Value) -> EvalResult {
    match form {
        Value::Symbol(name) => env
            .lookup(*name)
            .ok_or_else(|| unbound_variable(name.as_str())),
        Value::Cons(cell) => ensure_sufficient_stack(|| eval_call(env, cell)),
        other => Ok(other.clone()),
    }
}

/// Evaluate forms in order, returning the last value (nil when empty).
pub fn eval_body(env: &Environment, forms: &[Value]) -> EvalResult {
    let mut result = Value::Nil;
    for form in forms {
        result = eval(env, form)?;
    }
    Ok(result)
}

/// Evaluate each form, collecting the values.
pub fn eval_args(env: &Environment, forms: &[Value]) -> Result<Vec<Value>, EvalError> {
    forms.iter().map(|form| eval(env, form)).collect()
}

#[tracing::instrument(level = "trace", skip_all, fields(head = %cell.head()))]
fn eval_call(env: &Environment, cell: &Cons) -> EvalResult {
    let operator = eval(env, cell.head())?;
    let operands = cell.tail().to_vec()?;
    match &operator {
        Value::SpecialForm(form) => {
            check_purity(env, form.is_pure(), form.name())?;
            form.call(env, &operands)
        }
        Value::Macro(lambda) => {
            let expansion = expand_macro(env, lambda, &operands)?;
            eval(env, &expansion)
        }
        Value::Function(_) | Value::Builtin(_) => {
            let args = eval_args(env, &operands)?;
            apply(env, &operator, &args)
        }
        other => Err(not_callable(other)),
    }
}
