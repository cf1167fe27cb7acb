//! Definition-time macro expansion.
//!
//! [`macroexpand_all`] rewrites a form until no macro call remains outside
//! quoted data:
//!
//! - a call whose head symbol names a macro is expanded and the result
//!   expanded again;
//! - a head symbol that is unbound is simply not a macro;
//! - a special form's literal operands (parameter lists, binding names,
//!   quoted data) are left alone, and `quote`/`quasiquote` are not entered;
//! - every other call has its head and operands expanded element by
//!   element, walking the operand spine iteratively.

use murk_value::{ensure_sufficient_stack, Cons, Environment, EvalError, EvalResult, Value};

use crate::interpreter::{eval, expand_macro};

/// Expand every macro call in `form`.
pub fn macroexpand_all(env: &Environment, form: &Value) -> EvalResult {
    ensure_sufficient_stack(|| expand_form(env, form))
}

fn expand_form(env: &Environment, form: &Value) -> EvalResult {
    let mut form = form.clone();
    loop {
        let cell = match &form {
            Value::Cons(cell) => Some(cell.clone()),
            _ => None,
        };
        let Some(cell) = cell else {
            return Ok(form);
        };
        let literal_operands = match resolve_head(env, cell.head())? {
            Some(Value::Macro(lambda)) => {
                let operands = cell.tail().to_vec()?;
                form = expand_macro(env, &lambda, &operands)?;
                continue;
            }
            Some(Value::SpecialForm(special)) => special.literal_operands(),
            _ => 0,
        };
        if literal_operands == usize::MAX {
            return Ok(form);
        }
        return expand_operands(env, &cell, literal_operands);
    }
}

/// The value a head symbol names, if it is bound. Non-symbol heads are
/// never evaluated here.
fn resolve_head(env: &Environment, head: &Value) -> Result<Option<Value>, EvalError> {
    if !matches!(head, Value::Symbol(_)) {
        return Ok(None);
    }
    match eval(env, head) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind.is_unbound() => Ok(None),
        Err(err) => Err(err),
    }
}

fn expand_operands(env: &Environment, cell: &Cons, literal_operands: usize) -> EvalResult {
    let head = macroexpand_all(env, cell.head())?;
    let mut items = vec![head];
    let mut operands = cell.tail().iter();
    for (index, operand) in operands.by_ref().enumerate() {
        if index < literal_operands {
            items.push(operand.clone());
        } else {
            items.push(macroexpand_all(env, operand)?);
        }
    }
    Ok(Value::list_with_tail(items, operands.rest().clone()))
}
