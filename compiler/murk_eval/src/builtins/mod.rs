//! Builtin registration and the standard environment.
//!
//! Builtins are plain `fn(&[Value]) -> EvalResult`. The `register_builtin*`
//! helpers attach an [`Arity`] that is checked before the function runs, so
//! a two-argument builtin can index `args[0]` and `args[1]` directly.

mod arith;
mod list;
mod uncertainty;

use murk_value::{
    Arity, BuiltinFn, BuiltinFunction, Environment, Name, SpecialForm, SpecialFormFn, Value,
};

use crate::special_forms;

/// Install a builtin taking no arguments.
pub fn register_builtin0(env: &Environment, name: &str, func: BuiltinFn) {
    register_variadic(env, name, Arity::exact(0), func);
}

/// Install a builtin taking exactly one argument.
pub fn register_builtin1(env: &Environment, name: &str, func: BuiltinFn) {
    register_variadic(env, name, Arity::exact(1), func);
}

/// Install a builtin taking exactly two arguments.
pub fn register_builtin2(env: &Environment, name: &str, func: BuiltinFn) {
    register_variadic(env, name, Arity::exact(2), func);
}

/// Install a builtin with an arbitrary arity.
pub fn register_variadic(env: &Environment, name: &str, arity: Arity, func: BuiltinFn) {
    env.define(
        Name::intern(name),
        Value::builtin(BuiltinFunction::new(name, arity, func)),
    );
}

/// Install a special form whose first `literal_operands` operands are left
/// alone by macro expansion.
pub fn register_special_form(
    env: &Environment,
    name: &str,
    literal_operands: usize,
    func: SpecialFormFn,
) {
    env.define(
        Name::intern(name),
        Value::special_form(SpecialForm::new(name, literal_operands, func)),
    );
}

/// A root environment holding every special form and builtin.
pub fn standard_environment() -> Environment {
    let env = Environment::new();
    special_forms::register(&env);
    arith::register(&env);
    list::register(&env);
    uncertainty::register(&env);
    tracing::debug!(bindings = env.local_len(), "standard environment ready");
    env
}
