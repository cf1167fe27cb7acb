//! Runtime values for the murk interpreter.
//!
//! # Heap Enforcement
//!
//! Every boxed variant holds a [`Heap<T>`], whose constructor is private to
//! this crate. Outside code builds values through factory methods:
//!
//! ```text
//! let s = Value::string("hello");                 // OK
//! let xs = Value::list([Value::int(1)]);          // OK
//! let s = Value::Str(Heap::new(...));             // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Capabilities
//!
//! Operations never switch on a value's concrete kind to find out what it
//! can do. They ask for a capability instead: [`Value::as_numeric`],
//! [`Value::as_cons`], [`Value::as_unknown`], [`Value::is_atom`]. A `None`
//! answer means the capability is absent.
//!
//! # Thread Safety
//!
//! Values are immutable and `Send + Sync`; heap variants share through `Arc`.

mod list;

use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::callable::{BuiltinFunction, Lambda, SpecialForm};
use crate::errors::{invalid_typed_unknown, EvalError};
use crate::heap::Heap;
use crate::identity::{content_hash, same_value};
use crate::name::Name;
use crate::numeric::{self, Numeric};
use crate::range::NumInRange;
use crate::ternary::Ternary;
use crate::type_set::TypeSet;
use crate::unknown::{AnyOf, OptCons, Unknown};

pub use list::{Cons, ListIter};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Atoms (inline, no heap allocation)
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Symbol(Name),

    // Heap atoms
    /// Integer outside the `i64` range. Never holds a value that fits `Int`.
    BigInt(Heap<BigInt>),
    /// Exact non-integral rational. Never holds an integral value.
    Ratio(Heap<BigRational>),
    Str(Heap<String>),

    // Structure
    Cons(Heap<Cons>),

    // Uncertainty
    Unknown(Unknown),

    // Callables (atoms compared by identity)
    Function(Heap<Lambda>),
    Macro(Heap<Lambda>),
    Builtin(Heap<BuiltinFunction>),
    SpecialForm(Heap<SpecialForm>),
}

/// Type names reported by [`Value::type_name`] and used in [`TypeSet`]s.
pub mod type_names {
    pub const NIL: &str = "nil";
    pub const BOOL: &str = "bool";
    pub const INT: &str = "int";
    pub const FLOAT: &str = "float";
    pub const BIGINT: &str = "bigint";
    pub const RATIO: &str = "ratio";
    pub const STRING: &str = "string";
    pub const SYMBOL: &str = "symbol";
    pub const CONS: &str = "cons";
    pub const FUNCTION: &str = "function";
    pub const MACRO: &str = "macro";
    pub const BUILTIN: &str = "builtin";
    pub const SPECIAL_FORM: &str = "special-form";
    pub const UNKNOWN: &str = "unknown";

    /// Every concrete type name.
    pub const ALL: &[&str] = &[
        NIL,
        BOOL,
        INT,
        FLOAT,
        BIGINT,
        RATIO,
        STRING,
        SYMBOL,
        CONS,
        FUNCTION,
        MACRO,
        BUILTIN,
        SPECIAL_FORM,
    ];

    /// Type names with the numeric capability.
    pub const NUMERIC: &[&str] = &[INT, FLOAT, BIGINT, RATIO];

    /// Exact integer type names.
    pub const INTEGER: &[&str] = &[INT, BIGINT];
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(x: f64) -> Self {
        Value::Float(x)
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Arbitrary-precision integer, narrowed to `Int` when it fits.
    pub fn integer(n: BigInt) -> Self {
        numeric::normalize_bigint(n)
    }

    /// Exact rational, narrowed to an integer when the denominator is one.
    pub fn rational(r: BigRational) -> Self {
        numeric::normalize_ratio(r)
    }

    // Only the numeric module builds unnormalized variants.
    pub(crate) fn bigint_raw(n: BigInt) -> Self {
        Value::BigInt(Heap::new(n))
    }

    pub(crate) fn ratio_raw(r: BigRational) -> Self {
        Value::Ratio(Heap::new(r))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn symbol(text: &str) -> Self {
        Value::Symbol(Name::intern(text))
    }

    pub fn cons(head: Value, tail: Value) -> Self {
        Value::Cons(Heap::new(Cons::new(head, tail)))
    }

    /// Proper list of `items`.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        Value::list_with_tail(items, Value::Nil)
    }

    /// List of `items` ending in `tail` instead of nil.
    pub fn list_with_tail<I>(items: I, tail: Value) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(tail, |acc, item| Value::cons(item, acc))
    }

    pub fn function(lambda: Lambda) -> Self {
        Value::Function(Heap::new(lambda))
    }

    pub fn macro_value(lambda: Lambda) -> Self {
        Value::Macro(Heap::new(lambda))
    }

    pub fn builtin(builtin: BuiltinFunction) -> Self {
        Value::Builtin(Heap::new(builtin))
    }

    pub fn special_form(form: SpecialForm) -> Self {
        Value::SpecialForm(Heap::new(form))
    }

    /// The top of the uncertainty lattice.
    #[inline]
    pub fn unknown() -> Self {
        Value::Unknown(Unknown::Fully)
    }

    /// An unknown restricted to the given types. The set must be non-empty.
    pub fn typed_unknown(types: TypeSet) -> Result<Self, EvalError> {
        if types.is_empty() {
            return Err(invalid_typed_unknown("type set is empty"));
        }
        Ok(Value::Unknown(Unknown::Typed(types)))
    }

    pub fn num_in_range(range: NumInRange) -> Self {
        Value::Unknown(Unknown::NumInRange(Heap::new(range)))
    }

    /// Either `(head . tail)` or `tail` itself.
    pub fn opt_cons(head: Value, tail: Value) -> Self {
        Value::Unknown(Unknown::OptCons(Heap::new(OptCons::new(head, tail))))
    }

    pub(crate) fn any_of_raw(candidates: Vec<Value>) -> Self {
        Value::Unknown(Unknown::AnyOf(AnyOf::new_unchecked(candidates)))
    }

    /// The undetermined boolean: either true or false.
    pub fn maybe() -> Self {
        Value::any_of_raw(vec![Value::Bool(true), Value::Bool(false)])
    }

    pub fn from_ternary(t: Ternary) -> Self {
        match t {
            Ternary::True => Value::Bool(true),
            Ternary::False => Value::Bool(false),
            Ternary::Maybe => Value::maybe(),
        }
    }
}

// Capability queries

impl Value {
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Nil and false are the only concrete falsey values.
    #[inline]
    pub fn is_falsey(&self) -> bool {
        matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Numeric view of a concrete number.
    pub fn as_numeric(&self) -> Option<Numeric<'_>> {
        match self {
            Value::Int(n) => Some(Numeric::Int(*n)),
            Value::Float(x) => Some(Numeric::Float(*x)),
            Value::BigInt(n) => Some(Numeric::BigInt(n)),
            Value::Ratio(r) => Some(Numeric::Ratio(r)),
            _ => None,
        }
    }

    pub fn as_cons(&self) -> Option<&Cons> {
        match self {
            Value::Cons(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Name> {
        match self {
            Value::Symbol(name) => Some(*name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_unknown(&self) -> Option<&Unknown> {
        match self {
            Value::Unknown(u) => Some(u),
            _ => None,
        }
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown(_))
    }

    /// Atoms compare by exact value (or identity, for callables).
    pub fn is_atom(&self) -> bool {
        !matches!(self, Value::Cons(_) | Value::Unknown(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Function(_) | Value::Macro(_) | Value::Builtin(_) | Value::SpecialForm(_)
        )
    }

    /// Read a value as a truth value: booleans and the maybe value.
    pub fn as_ternary(&self) -> Option<Ternary> {
        match self {
            Value::Bool(b) => Some(Ternary::from_bool(*b)),
            Value::Unknown(Unknown::AnyOf(any)) if any.is_maybe() => Some(Ternary::Maybe),
            _ => None,
        }
    }

    /// Concrete type name, or `unknown` for every uncertain value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => type_names::NIL,
            Value::Bool(_) => type_names::BOOL,
            Value::Int(_) => type_names::INT,
            Value::Float(_) => type_names::FLOAT,
            Value::BigInt(_) => type_names::BIGINT,
            Value::Ratio(_) => type_names::RATIO,
            Value::Str(_) => type_names::STRING,
            Value::Symbol(_) => type_names::SYMBOL,
            Value::Cons(_) => type_names::CONS,
            Value::Unknown(_) => type_names::UNKNOWN,
            Value::Function(_) => type_names::FUNCTION,
            Value::Macro(_) => type_names::MACRO,
            Value::Builtin(_) => type_names::BUILTIN,
            Value::SpecialForm(_) => type_names::SPECIAL_FORM,
        }
    }

    /// Whether this value is uncertain.
    ///
    /// Atoms are certain, unknowns are uncertain, and a list whose cells are
    /// concrete but whose elements (or tail) are not is `Maybe`.
    pub fn uncertain(&self) -> Ternary {
        match self {
            Value::Unknown(_) => Ternary::True,
            Value::Cons(_) => {
                let mut iter = self.iter();
                for item in iter.by_ref() {
                    if !crate::stack::ensure_sufficient_stack(|| item.uncertain()).is_false() {
                        return Ternary::Maybe;
                    }
                }
                if iter.rest().is_unknown() {
                    Ternary::Maybe
                } else {
                    Ternary::False
                }
            }
            _ => Ternary::False,
        }
    }

    /// Iterate over the heads of a list spine.
    ///
    /// After the iterator is exhausted, [`ListIter::rest`] holds whatever
    /// ended the spine: nil for a proper list.
    pub fn iter(&self) -> ListIter<'_> {
        ListIter::new(self)
    }

    /// Collect a proper list into a vector.
    pub fn to_vec(&self) -> Result<Vec<Value>, EvalError> {
        let mut iter = self.iter();
        let items: Vec<Value> = iter.by_ref().cloned().collect();
        if iter.rest().is_nil() {
            Ok(items)
        } else {
            Err(crate::errors::expected_proper_list(self))
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        same_value(self, other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(content_hash(self));
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(true) => f.write_str("#t"),
            Value::Bool(false) => f.write_str("#f"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(f, *x),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Ratio(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Value::Str(s) => write_escaped(f, s),
            Value::Symbol(name) => write!(f, "{name}"),
            Value::Cons(_) => {
                f.write_str("(")?;
                let mut iter = self.iter();
                for (i, item) in iter.by_ref().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    crate::stack::ensure_sufficient_stack(|| write!(f, "{item}"))?;
                }
                let rest = iter.rest();
                if !rest.is_nil() {
                    write!(f, " . {rest}")?;
                }
                f.write_str(")")
            }
            Value::Unknown(u) => write!(f, "{u}"),
            Value::Function(l) => write!(f, "#<function {}>", l.display_name()),
            Value::Macro(l) => write!(f, "#<macro {}>", l.display_name()),
            Value::Builtin(b) => write!(f, "#<builtin {}>", b.name()),
            Value::SpecialForm(s) => write!(f, "#<special-form {}>", s.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
