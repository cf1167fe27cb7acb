//! Builtins that build and inspect uncertain values, plus `type-of` and
//! `print!`.

use murk_value::errors::{invalid_typed_unknown, type_mismatch};
use murk_value::{
    any_of, intersects, possible_types, type_names, Arity, Bound, Environment, EvalError,
    EvalResult, NumInRange, NumRange, Ternary, TypeSet, Unknown, Value,
};

use super::{register_builtin0, register_builtin1, register_builtin2, register_variadic};

pub(super) fn register(env: &Environment) {
    register_variadic(env, "any-of", Arity::at_least(0), any_of_builtin);
    register_builtin0(env, "unknown", unknown);
    register_variadic(env, "typed-unknown", Arity::at_least(1), typed_unknown);
    register_variadic(env, "num-in-range", Arity::between(2, 4), num_in_range);
    register_builtin2(env, "opt-cons", opt_cons);

    register_builtin1(env, "uncertain?", uncertain);
    register_builtin1(env, "maybe?", maybe);
    register_builtin1(env, "possible-types", possible_types_builtin);
    register_builtin2(env, "intersects?", intersects_builtin);
    register_builtin1(env, "candidates", candidates);

    register_builtin1(env, "type-of", type_of);
    register_variadic(env, "print!", Arity::at_least(0), print);
}

fn any_of_builtin(args: &[Value]) -> EvalResult {
    any_of(args.iter().cloned())
}

fn unknown(_args: &[Value]) -> EvalResult {
    Ok(Value::unknown())
}

/// `(typed-unknown 'int 'string)`: names may be symbols or strings.
fn typed_unknown(args: &[Value]) -> EvalResult {
    let mut names = Vec::with_capacity(args.len());
    for arg in args {
        let name = match arg {
            Value::Symbol(name) => name.as_str(),
            Value::Str(s) => s.as_str(),
            other => return Err(type_mismatch(type_names::SYMBOL, other)),
        };
        if !type_names::ALL.contains(&name) {
            return Err(invalid_typed_unknown(format!("no type named `{name}`")));
        }
        names.push(name.to_string());
    }
    Value::typed_unknown(TypeSet::new(names))
}

fn inclusive_flag(flag: Option<&Value>) -> Result<bool, EvalError> {
    match flag {
        None => Ok(true),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Nil) => Ok(false),
        Some(other) => Err(type_mismatch(type_names::BOOL, other)),
    }
}

fn bound(value: &Value, inclusive: bool) -> Result<Option<Bound>, EvalError> {
    if value.is_nil() {
        Ok(None)
    } else {
        Bound::new(value.clone(), inclusive).map(Some)
    }
}

/// `(num-in-range low high [low-inclusive high-inclusive])`
///
/// A nil bound is unbounded. Bounds are inclusive unless a flag says
/// otherwise.
fn num_in_range(args: &[Value]) -> EvalResult {
    let low_inclusive = inclusive_flag(args.get(2))?;
    let high_inclusive = inclusive_flag(args.get(3))?;
    let range = NumRange::new(
        bound(&args[0], low_inclusive)?,
        bound(&args[1], high_inclusive)?,
    )?;
    Ok(Value::num_in_range(NumInRange::new(range, None)?))
}

fn opt_cons(args: &[Value]) -> EvalResult {
    Ok(Value::opt_cons(args[0].clone(), args[1].clone()))
}

fn uncertain(args: &[Value]) -> EvalResult {
    Ok(Value::from_ternary(args[0].uncertain()))
}

/// Whether the argument is the maybe truth value.
fn maybe(args: &[Value]) -> EvalResult {
    Ok(Value::boolean(args[0].as_ternary() == Some(Ternary::Maybe)))
}

/// Type names as a list of symbols; every type when unconstrained.
fn possible_types_builtin(args: &[Value]) -> EvalResult {
    let names: Vec<Value> = match possible_types(&args[0]) {
        Some(types) => types.iter().map(Value::Symbol).collect(),
        None => type_names::ALL.iter().map(|n| Value::symbol(n)).collect(),
    };
    Ok(Value::list(names))
}

fn intersects_builtin(args: &[Value]) -> EvalResult {
    Ok(Value::boolean(intersects(&args[0], &args[1])?))
}

/// The alternatives of a disjunctive value as a list. A concrete value is
/// its own single candidate.
fn candidates(args: &[Value]) -> EvalResult {
    let value = &args[0];
    if let Some(alternatives) = value.as_unknown().and_then(Unknown::alternatives) {
        return Ok(Value::list(alternatives));
    }
    if value.is_unknown() {
        return Err(type_mismatch("any-of", value));
    }
    Ok(Value::list([value.clone()]))
}

fn type_of(args: &[Value]) -> EvalResult {
    Ok(Value::symbol(args[0].type_name()))
}

/// Print the arguments separated by spaces. Strings print without quotes.
fn print(args: &[Value]) -> EvalResult {
    let line = args
        .iter()
        .map(|arg| match arg.as_str() {
            Some(s) => s.to_string(),
            None => arg.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("{line}");
    Ok(args.last().cloned().unwrap_or(Value::Nil))
}
