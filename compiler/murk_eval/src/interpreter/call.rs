//! Function application and parameter binding.

use murk_value::errors::{impure_call_in_pure_context, not_callable};
use murk_value::{Environment, EvalError, EvalResult, Lambda, LambdaList, Value};

use super::{eval, eval_body};

/// Refuse an impure operation inside a pure environment.
pub fn check_purity(env: &Environment, pure: bool, name: &str) -> Result<(), EvalError> {
    if !pure && env.is_pure() {
        tracing::debug!(operation = name, "refusing impure call in pure context");
        return Err(impure_call_in_pure_context(name));
    }
    Ok(())
}

/// Apply a function or builtin to already evaluated arguments.
///
/// `env` is the caller's environment; it decides purity.
pub fn apply(env: &Environment, callee: &Value, args: &[Value]) -> EvalResult {
    match callee {
        Value::Builtin(builtin) => {
            check_purity(env, builtin.is_pure(), builtin.name())?;
            builtin.call(args)
        }
        Value::Function(lambda) => {
            check_purity(env, lambda.is_pure(), lambda.display_name())?;
            call_lambda(env, lambda, args)
        }
        other => Err(not_callable(other)),
    }
}

/// Run a lambda's body in a fresh scope under its defining environment.
///
/// A call made from a pure environment runs in a pure scope, whatever the
/// lambda closed over.
#[tracing::instrument(level = "trace", skip_all, fields(function = lambda.display_name()))]
pub fn call_lambda(caller: &Environment, lambda: &Lambda, args: &[Value]) -> EvalResult {
    let scope = lambda.env().child();
    if caller.is_pure() {
        scope.mark_pure();
    }
    bind_parameters(&scope, lambda.params(), args, lambda.display_name())?;
    eval_body(&scope, lambda.body())
}

/// Expand a macro call: the macro body runs on the unevaluated operands and
/// its result is the expansion.
pub fn expand_macro(env: &Environment, lambda: &Lambda, operands: &[Value]) -> EvalResult {
    check_purity(env, lambda.is_pure(), lambda.display_name())?;
    let expansion = call_lambda(env, lambda, operands)?;
    tracing::trace!(name = lambda.display_name(), %expansion, "macro expanded");
    Ok(expansion)
}

/// Bind `args` to the parameters of `params` in `scope`.
///
/// Required parameters bind positionally. Each optional parameter takes the
/// next argument if there is one, otherwise its default, evaluated in a pure
/// child of `scope` (so it sees earlier parameters). The rest parameter
/// collects whatever remains as a list.
pub fn bind_parameters(
    scope: &Environment,
    params: &LambdaList,
    args: &[Value],
    callee: &str,
) -> Result<(), EvalError> {
    params.arity().check(callee, args.len())?;

    let mut remaining = args.iter();
    for name in params.required() {
        // Arity was checked, so every required parameter has an argument.
        let value = remaining.next().cloned().unwrap_or(Value::Nil);
        scope.define(*name, value);
    }
    for param in params.optional() {
        let value = match remaining.next() {
            Some(arg) => arg.clone(),
            None => match &param.default {
                Some(default) => eval(&scope.pure_child(), default)?,
                None => Value::Nil,
            },
        };
        scope.define(param.name, value);
    }
    if let Some(rest) = params.rest() {
        scope.define(rest, Value::list(remaining.cloned().collect::<Vec<_>>()));
    }
    Ok(())
}
