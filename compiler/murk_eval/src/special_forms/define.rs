//! Binding and definition forms.

use murk_value::errors::{immutable_binding, unbound_variable};
use murk_value::{
    Arity, AssignError, Environment, EvalError, EvalResult, Lambda, LambdaList, Mutability, Name,
    Value,
};

use super::{expect_operands, name_operand};
use crate::expand::macroexpand_all;
use crate::interpreter::eval;

/// Parse the parameter list and expand the body once, at definition time.
fn make_lambda(
    env: &Environment,
    name: Option<Name>,
    params: &Value,
    body: &[Value],
) -> Result<Lambda, EvalError> {
    let params = LambdaList::parse(params)?;
    let body = body
        .iter()
        .map(|form| macroexpand_all(env, form))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Lambda::new(name, params, body, env.clone()))
}

fn bind_global(env: &Environment, name: Name, value: Value, mutability: Mutability) -> EvalResult {
    env.try_bind_root_with(name, value, mutability)
        .map_err(|_| immutable_binding(name.as_str()))?;
    Ok(Value::Symbol(name))
}

/// `(lambda params body...)`
pub fn lambda(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("lambda", Arity::at_least(1), operands)?;
    let lambda = make_lambda(env, None, &operands[0], &operands[1..])?;
    Ok(Value::function(lambda))
}

/// `(defun name params body...)`: global function definition.
pub fn defun(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("defun", Arity::at_least(2), operands)?;
    let name = name_operand("defun", &operands[0])?;
    let lambda = make_lambda(env, Some(name), &operands[1], &operands[2..])?;
    tracing::debug!(%name, "defun");
    bind_global(env, name, Value::function(lambda), Mutability::Mutable)
}

/// `(defmacro name params body...)`: global macro definition.
pub fn defmacro(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("defmacro", Arity::at_least(2), operands)?;
    let name = name_operand("defmacro", &operands[0])?;
    let lambda = make_lambda(env, Some(name), &operands[1], &operands[2..])?;
    tracing::debug!(%name, "defmacro");
    bind_global(env, name, Value::macro_value(lambda), Mutability::Mutable)
}

/// `(define name value)`: global variable definition.
pub fn define(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("define", Arity::exact(2), operands)?;
    let name = name_operand("define", &operands[0])?;
    let value = eval(env, &operands[1])?;
    bind_global(env, name, value, Mutability::Mutable)
}

/// `(defconst name value)`: global constant. The value is computed in a
/// pure scope and the binding rejects `set!`.
pub fn defconst(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("defconst", Arity::exact(2), operands)?;
    let name = name_operand("defconst", &operands[0])?;
    let value = eval(&env.pure_child(), &operands[1])?;
    bind_global(env, name, value, Mutability::Immutable)
}

/// `(set! name value)`: update the innermost existing binding.
pub fn set(env: &Environment, operands: &[Value]) -> EvalResult {
    expect_operands("set!", Arity::exact(2), operands)?;
    let name = name_operand("set!", &operands[0])?;
    let value = eval(env, &operands[1])?;
    match env.assign(name, value.clone()) {
        Ok(()) => Ok(value),
        Err(AssignError::Immutable) => Err(immutable_binding(name.as_str())),
        Err(AssignError::Unbound) => Err(unbound_variable(name.as_str())),
    }
}
