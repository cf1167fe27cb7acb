//! Arithmetic, comparison and `not`.
//!
//! All of these accept uncertain operands; see [`murk_value::lift`].

use murk_value::lift::{arith, compare};
use murk_value::{
    equals, truthiness, ArithOp, Arity, CompareOp, Environment, EvalError, EvalResult, Ternary,
    Value,
};

use super::{register_builtin1, register_builtin2, register_variadic};

pub(super) fn register(env: &Environment) {
    register_variadic(env, "+", Arity::at_least(0), add);
    register_variadic(env, "-", Arity::at_least(1), sub);
    register_variadic(env, "*", Arity::at_least(0), mul);
    register_variadic(env, "/", Arity::at_least(1), div);

    register_variadic(env, "=", Arity::at_least(1), num_eq);
    register_builtin2(env, "/=", not_eq);
    register_variadic(env, "<", Arity::at_least(1), lt);
    register_variadic(env, ">", Arity::at_least(1), gt);
    register_variadic(env, "<=", Arity::at_least(1), le);
    register_variadic(env, ">=", Arity::at_least(1), ge);

    register_builtin1(env, "not", not);
}

fn fold(op: ArithOp, init: Value, args: &[Value]) -> EvalResult {
    args.iter().try_fold(init, |acc, x| arith(op, &acc, x))
}

/// `(- x)` negates, `(/ x)` takes the reciprocal; otherwise fold from the
/// first argument.
fn fold_from_first(op: ArithOp, identity: Value, args: &[Value]) -> EvalResult {
    match args {
        [only] => arith(op, &identity, only),
        [first, rest @ ..] => fold(op, first.clone(), rest),
        [] => Ok(identity),
    }
}

fn add(args: &[Value]) -> EvalResult {
    fold(ArithOp::Add, Value::int(0), args)
}

fn sub(args: &[Value]) -> EvalResult {
    fold_from_first(ArithOp::Sub, Value::int(0), args)
}

fn mul(args: &[Value]) -> EvalResult {
    fold(ArithOp::Mul, Value::int(1), args)
}

fn div(args: &[Value]) -> EvalResult {
    fold_from_first(ArithOp::Div, Value::int(1), args)
}

/// Combine a relation over adjacent pairs with three-valued `and`, stopping
/// at the first definite `False`.
fn chain(
    args: &[Value],
    relation: impl Fn(&Value, &Value) -> Result<Ternary, EvalError>,
) -> EvalResult {
    let mut acc = Ternary::True;
    for pair in args.windows(2) {
        acc = acc.and(relation(&pair[0], &pair[1])?);
        if acc.is_false() {
            break;
        }
    }
    Ok(Value::from_ternary(acc))
}

fn num_eq(args: &[Value]) -> EvalResult {
    chain(args, equals)
}

fn not_eq(args: &[Value]) -> EvalResult {
    Ok(Value::from_ternary(equals(&args[0], &args[1])?.not()))
}

fn lt(args: &[Value]) -> EvalResult {
    chain(args, |a, b| compare(CompareOp::Lt, a, b))
}

fn gt(args: &[Value]) -> EvalResult {
    chain(args, |a, b| compare(CompareOp::Gt, a, b))
}

fn le(args: &[Value]) -> EvalResult {
    chain(args, |a, b| compare(CompareOp::Le, a, b))
}

fn ge(args: &[Value]) -> EvalResult {
    chain(args, |a, b| compare(CompareOp::Ge, a, b))
}

fn not(args: &[Value]) -> EvalResult {
    Ok(Value::from_ternary(truthiness(&args[0]).not()))
}
