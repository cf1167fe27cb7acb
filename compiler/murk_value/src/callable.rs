//! Callable values: closures, macros, builtins and special forms.
//!
//! Purity comes from the name: anything named with a trailing `!` may have
//! side effects and cannot run inside a pure environment.

use std::fmt;

use crate::env::Environment;
use crate::errors::{arity_mismatch, EvalError, EvalResult};
use crate::lambda_list::LambdaList;
use crate::name::Name;
use crate::value::Value;

/// Suffix marking an impure operation.
pub const IMPURE_MARKER: char = '!';

/// Whether an operation with this name is pure.
#[inline]
pub fn is_pure_name(name: &str) -> bool {
    !name.ends_with(IMPURE_MARKER)
}

/// Accepted argument counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` means no upper limit.
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exact(n: usize) -> Self {
        Arity {
            min: n,
            max: Some(n),
        }
    }

    pub const fn at_least(n: usize) -> Self {
        Arity { min: n, max: None }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: Some(max),
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    /// Fail with an arity error naming `callee` if `count` is not accepted.
    pub fn check(self, callee: &str, count: usize) -> Result<(), EvalError> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(arity_mismatch(callee, self.min, self.max, count))
        }
    }
}

/// A user-defined function or macro closing over its defining environment.
pub struct Lambda {
    name: Option<Name>,
    params: LambdaList,
    body: Vec<Value>,
    env: Environment,
    pure: bool,
}

impl Lambda {
    /// `body` should already be macro-expanded.
    pub fn new(name: Option<Name>, params: LambdaList, body: Vec<Value>, env: Environment) -> Self {
        let pure = name.map_or(true, |n| is_pure_name(n.as_str()));
        Lambda {
            name,
            params,
            body,
            env,
            pure,
        }
    }

    pub fn name(&self) -> Option<Name> {
        self.name
    }

    /// Name for messages; anonymous lambdas show as `lambda`.
    pub fn display_name(&self) -> &'static str {
        self.name.map_or("lambda", Name::as_str)
    }

    pub fn params(&self) -> &LambdaList {
        &self.params
    }

    pub fn body(&self) -> &[Value] {
        &self.body
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn is_pure(&self) -> bool {
        self.pure
    }
}

/// Signature of a native function. Receives evaluated arguments.
pub type BuiltinFn = fn(&[Value]) -> EvalResult;

/// A native function.
pub struct BuiltinFunction {
    name: Name,
    arity: Arity,
    func: BuiltinFn,
    pure: bool,
}

impl BuiltinFunction {
    pub fn new(name: &str, arity: Arity, func: BuiltinFn) -> Self {
        BuiltinFunction {
            name: Name::intern(name),
            arity,
            func,
            pure: is_pure_name(name),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name.as_str()
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn is_pure(&self) -> bool {
        self.pure
    }

    /// Check the argument count, then run the function.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        self.arity.check(self.name(), args.len())?;
        (self.func)(args)
    }
}

/// Signature of a special form. Receives the environment and the
/// unevaluated operand forms.
pub type SpecialFormFn = fn(&Environment, &[Value]) -> EvalResult;

/// An operator that controls evaluation of its own operands.
pub struct SpecialForm {
    name: Name,
    func: SpecialFormFn,
    pure: bool,
    literal_operands: usize,
}

impl SpecialForm {
    /// `literal_operands` leading operands are data, not code, and are left
    /// alone by macro expansion (`usize::MAX` for all of them).
    pub fn new(name: &str, literal_operands: usize, func: SpecialFormFn) -> Self {
        SpecialForm {
            name: Name::intern(name),
            func,
            pure: is_pure_name(name),
            literal_operands,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name.as_str()
    }

    pub fn is_pure(&self) -> bool {
        self.pure
    }

    pub fn literal_operands(&self) -> usize {
        self.literal_operands
    }

    pub fn call(&self, env: &Environment, operands: &[Value]) -> EvalResult {
        (self.func)(env, operands)
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("name", &self.display_name())
            .field("params", &self.params)
            .field("pure", &self.pure)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name())
    }
}

impl fmt::Debug for SpecialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpecialForm({})", self.name())
    }
}
