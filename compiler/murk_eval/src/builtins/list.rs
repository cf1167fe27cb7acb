//! List builtins.
//!
//! Accessors map over disjunctive arguments: `(car #any-of((1 2) (3)))` is
//! `#any-of(1 3)`.

use murk_value::errors::{expected_proper_list, type_mismatch};
use murk_value::lift::arith;
use murk_value::{
    equals, map_alternatives, possible_types, type_names, ArithOp, Arity, Environment,
    EvalResult, Ternary, TypeSet, Unknown, Value,
};

use super::{register_builtin1, register_builtin2, register_variadic};

pub(super) fn register(env: &Environment) {
    register_builtin2(env, "cons", cons);
    register_builtin1(env, "car", car);
    register_builtin1(env, "cdr", cdr);
    register_variadic(env, "list", Arity::at_least(0), list);
    register_builtin1(env, "length", length);
    register_builtin1(env, "null?", null);
    register_builtin1(env, "consp", consp);
}

fn cons(args: &[Value]) -> EvalResult {
    Ok(Value::cons(args[0].clone(), args[1].clone()))
}

fn list(args: &[Value]) -> EvalResult {
    Ok(Value::list(args.to_vec()))
}

/// Whether an unknown might be a cons, in which case its parts are unknown.
fn may_be_cons(value: &Value) -> bool {
    match value.as_unknown() {
        Some(Unknown::Fully) => true,
        Some(Unknown::Typed(types)) => types.contains(type_names::CONS),
        _ => false,
    }
}

fn car(args: &[Value]) -> EvalResult {
    map_alternatives(&args[0], &|v: &Value| match v {
        Value::Cons(cell) => Ok(cell.head().clone()),
        Value::Nil => Ok(Value::Nil),
        other if may_be_cons(other) => Ok(Value::unknown()),
        other => Err(type_mismatch(type_names::CONS, other)),
    })
}

fn cdr(args: &[Value]) -> EvalResult {
    map_alternatives(&args[0], &|v: &Value| match v {
        Value::Cons(cell) => Ok(cell.tail().clone()),
        Value::Nil => Ok(Value::Nil),
        other if may_be_cons(other) => Ok(Value::unknown()),
        other => Err(type_mismatch(type_names::CONS, other)),
    })
}

fn length(args: &[Value]) -> EvalResult {
    map_alternatives(&args[0], &length_of)
}

/// Count the concrete spine, then account for an uncertain tail.
fn length_of(list: &Value) -> EvalResult {
    let mut iter = list.iter();
    let count = i64::try_from(iter.by_ref().count()).unwrap_or(i64::MAX);
    let rest = iter.rest();
    if rest.is_nil() {
        return Ok(Value::int(count));
    }
    if rest.as_unknown().and_then(Unknown::alternatives).is_some() {
        let rest_length = map_alternatives(rest, &length_of)?;
        return arith(ArithOp::Add, &Value::int(count), &rest_length);
    }
    if may_be_cons(rest) {
        return Value::typed_unknown(TypeSet::single(type_names::INT));
    }
    Err(expected_proper_list(list))
}

fn null(args: &[Value]) -> EvalResult {
    Ok(Value::from_ternary(equals(&args[0], &Value::Nil)?))
}

fn consp(args: &[Value]) -> EvalResult {
    let answer = match possible_types(&args[0]) {
        None => Ternary::Maybe,
        Some(types) if !types.contains(type_names::CONS) => Ternary::False,
        Some(types) if types.len() == 1 => Ternary::True,
        Some(_) => Ternary::Maybe,
    };
    Ok(Value::from_ternary(answer))
}
