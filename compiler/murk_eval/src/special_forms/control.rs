//! Conditionals, sequencing and scoping forms.
//!
//! Conditions are read with [`truthiness`]. A branch can only be chosen when
//! the answer is definite: a `Maybe` condition is an
//! [`UncertainBranchCondition`](murk_value::EvalErrorKind::UncertainBranchCondition)
//! error. `and` and `or` instead combine their operands with three-valued
//! logic and may produce the maybe value.

use murk_value::errors::{malformed_form, uncertain_branch_condition};
use murk_value::{truthiness, Arity, Environment, EvalError, EvalResult, Ternary, Value};

use super::{expect_operands, name_operand};
use crate::expand::macroexpand_all;
use crate::interpreter::{eval, eval_body};

/// Decide a branch condition.
fn decide(condition: &Value) -> Result<bool, EvalError> {
    match truthiness(condition) {
        Ternary::True => Ok(true),
        Ternary::False => Ok(false),
        Ternary::Maybe => {
            tracing::debug!(%condition, "refusing to branch on uncertain condition");
            Err(uncertain_branch_condition(condition))
        }
    }
}

/// `(if test then [else])`
pub fn if_form(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("if", Arity::between(2, 3), operands)?;
    let condition = eval(env, &operands[0])?;
    if decide(&condition)? {
        eval(env, &operands[1])
    } else {
        operands.get(2).map_or(Ok(Value::Nil), |alt| eval(env, alt))
    }
}

/// `(cond (test body...)...)`
///
/// The first clause whose test is true runs its body; a clause without a
/// body yields the test value. The symbol `else` is an always-true test.
pub fn cond(env: &Environment, clauses: &[Value]) -> EvalResult {
    for clause in clauses {
        let parts = clause
            .to_vec()
            .map_err(|_| malformed_form("cond", format!("clause `{clause}` is not a list")))?;
        let Some((test, body)) = parts.split_first() else {
            return Err(malformed_form("cond", "empty clause"));
        };
        let value = if test.as_symbol().is_some_and(|s| s.is("else")) {
            Value::boolean(true)
        } else {
            eval(env, test)?
        };
        if decide(&value)? {
            return if body.is_empty() {
                Ok(value)
            } else {
                eval_body(env, body)
            };
        }
    }
    Ok(Value::Nil)
}

/// `(and x...)`
///
/// Stops at the first definitely false operand and returns it. Otherwise
/// returns the last value if every operand was true, or maybe if some were
/// uncertain.
pub fn and(env: &Environment, operands: &[Value]) -> EvalResult {
    let mut acc = Ternary::True;
    let mut last = Value::boolean(true);
    for operand in operands {
        last = eval(env, operand)?;
        acc = acc.and(truthiness(&last));
        if acc.is_false() {
            return Ok(last);
        }
    }
    Ok(if acc.is_maybe() { Value::maybe() } else { last })
}

/// `(or x...)`
///
/// Stops at the first definitely true operand and returns it. Otherwise
/// returns the last value if every operand was false, or maybe if some were
/// uncertain.
pub fn or(env: &Environment, operands: &[Value]) -> EvalResult {
    let mut acc = Ternary::False;
    let mut last = Value::boolean(false);
    for operand in operands {
        last = eval(env, operand)?;
        let t = truthiness(&last);
        if t.is_true() {
            return Ok(last);
        }
        acc = acc.or(t);
    }
    Ok(if acc.is_maybe() { Value::maybe() } else { last })
}

/// `(progn body...)`
pub fn progn(env: &Environment, body: &[Value]) -> EvalResult {
    eval_body(env, body)
}

/// `(let ((name value)... ) body...)`
///
/// Values are evaluated in the enclosing scope, then bound together in a
/// new one. A bare `name` or `(name)` binds nil.
pub fn let_form(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("let", Arity::at_least(1), operands)?;
    let bindings = operands[0]
        .to_vec()
        .map_err(|_| malformed_form("let", "bindings must be a list"))?;

    let mut values = Vec::with_capacity(bindings.len());
    for binding in &bindings {
        let (name, init) = match binding {
            Value::Symbol(name) => (*name, None),
            other => {
                let parts = other
                    .to_vec()
                    .map_err(|_| malformed_form("let", format!("bad binding `{other}`")))?;
                match parts.as_slice() {
                    [name] => (name_operand("let", name)?, None),
                    [name, init] => (name_operand("let", name)?, Some(init.clone())),
                    _ => return Err(malformed_form("let", format!("bad binding `{other}`"))),
                }
            }
        };
        let value = match init {
            Some(init) => eval(env, &init)?,
            None => Value::Nil,
        };
        values.push((name, value));
    }

    let scope = env.child();
    for (name, value) in values {
        scope.define(name, value);
    }
    eval_body(&scope, &operands[1..])
}

/// `(pure body...)`: run the body where impure operations are refused.
///
/// Purity follows names: only operators ending in `!` (`set!`, `print!`,
/// user functions like `launch!`) are refused. `define`, `defun` and
/// `defmacro` are not marked impure, so global definitions still work
/// inside a pure body.
pub fn pure(env: &Environment, body: &[Value]) -> EvalResult {
    eval_body(&env.pure_child(), body)
}

/// `(macroexpand form)`: evaluate `form` to get code, then expand it.
pub fn macroexpand(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("macroexpand", Arity::exact(1), operands)?;
    let code = eval(env, &operands[0])?;
    macroexpand_all(env, &code)
}
