//! The numeric tower.
//!
//! Four concrete representations: `Int` (i64), `Float` (f64), `BigInt` and
//! `Ratio`. Exact arithmetic never overflows: `Int` results that leave the
//! i64 range promote to `BigInt`, inexact integer division produces a
//! `Ratio`, and results are narrowed back to the smallest exact
//! representation. Any float operand makes the result a float.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

use crate::errors::{division_by_zero, EvalError, EvalResult};
use crate::value::{type_names, Value};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

/// Borrowed view of a concrete number.
#[derive(Clone, Copy, Debug)]
pub enum Numeric<'a> {
    Int(i64),
    Float(f64),
    BigInt(&'a BigInt),
    Ratio(&'a BigRational),
}

impl Numeric<'_> {
    pub fn type_name(self) -> &'static str {
        match self {
            Numeric::Int(_) => type_names::INT,
            Numeric::Float(_) => type_names::FLOAT,
            Numeric::BigInt(_) => type_names::BIGINT,
            Numeric::Ratio(_) => type_names::RATIO,
        }
    }

    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, Numeric::Float(_))
    }

    pub fn is_integer_typed(self) -> bool {
        matches!(self, Numeric::Int(_) | Numeric::BigInt(_))
    }

    pub fn is_zero(self) -> bool {
        match self {
            Numeric::Int(n) => n == 0,
            Numeric::Float(x) => x == 0.0,
            Numeric::BigInt(n) => n.is_zero(),
            Numeric::Ratio(r) => r.is_zero(),
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Numeric::Float(x) if x.is_nan())
    }

    /// Sign relative to zero. NaN reports `Equal`.
    pub fn signum(self) -> Ordering {
        match self {
            Numeric::Int(n) => n.cmp(&0),
            Numeric::Float(x) => x.partial_cmp(&0.0).unwrap_or(Ordering::Equal),
            Numeric::BigInt(n) => n.cmp(&BigInt::zero()),
            Numeric::Ratio(r) => r.cmp(&BigRational::zero()),
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "float contagion is lossy by definition")]
    pub fn to_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Float(x) => x,
            Numeric::BigInt(n) => n.to_f64().unwrap_or(f64::NAN),
            Numeric::Ratio(r) => r.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Exact integer value, if this number is integral.
    pub fn to_bigint(self) -> Option<BigInt> {
        match self {
            Numeric::Int(n) => Some(BigInt::from(n)),
            Numeric::BigInt(n) => Some(n.clone()),
            Numeric::Float(x) if x.is_finite() && x.fract() == 0.0 => BigInt::from_f64(x),
            Numeric::Float(_) => None,
            Numeric::Ratio(r) if r.is_integer() => Some(r.to_integer()),
            Numeric::Ratio(_) => None,
        }
    }

    /// Exact `i64` value, if this number is integral and in range.
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Numeric::Int(n) => Some(n),
            other => other.to_bigint().and_then(|n| n.to_i64()),
        }
    }

    /// Exact rational value. Fails only for non-finite floats.
    pub fn to_ratio(self) -> Option<BigRational> {
        match self {
            Numeric::Int(n) => Some(BigRational::from_integer(BigInt::from(n))),
            Numeric::BigInt(n) => Some(BigRational::from_integer(n.clone())),
            Numeric::Ratio(r) => Some(r.clone()),
            Numeric::Float(x) => BigRational::from_float(x),
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            Numeric::Int(n) => Value::Int(n),
            Numeric::Float(x) => Value::Float(x),
            Numeric::BigInt(n) => Value::bigint_raw(n.clone()),
            Numeric::Ratio(r) => Value::ratio_raw(r.clone()),
        }
    }
}

/// Narrow an integer to `Int` when it fits.
pub fn normalize_bigint(n: BigInt) -> Value {
    match n.to_i64() {
        Some(small) => Value::Int(small),
        None => Value::bigint_raw(n),
    }
}

/// Narrow a rational to an integer when its denominator is one.
pub fn normalize_ratio(r: BigRational) -> Value {
    if r.is_integer() {
        normalize_bigint(r.to_integer())
    } else {
        Value::ratio_raw(r)
    }
}

/// Total order over all numbers.
///
/// Exact values compare exactly; a finite float is converted to its exact
/// rational value first, so `-0.0`, `0.0` and `0` are all equal. Infinities
/// sit at the ends and NaN sorts above positive infinity (below negative
/// infinity when its sign bit is set), matching `f64::total_cmp`.
pub fn compare(a: Numeric<'_>, b: Numeric<'_>) -> Ordering {
    match (a, b) {
        (Numeric::Int(x), Numeric::Int(y)) => x.cmp(&y),
        (Numeric::Float(x), Numeric::Float(y)) => {
            // Only NaN lacks a value order.
            x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
        }
        (Numeric::Float(x), _) if !x.is_finite() => non_finite_vs_exact(x),
        (_, Numeric::Float(y)) if !y.is_finite() => non_finite_vs_exact(y).reverse(),
        (Numeric::Int(x), Numeric::BigInt(y)) => BigInt::from(x).cmp(y),
        (Numeric::BigInt(x), Numeric::Int(y)) => (*x).cmp(&BigInt::from(y)),
        (Numeric::BigInt(x), Numeric::BigInt(y)) => x.cmp(y),
        _ => match (a.to_ratio(), b.to_ratio()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.to_f64().total_cmp(&b.to_f64()),
        },
    }
}

fn non_finite_vs_exact(x: f64) -> Ordering {
    if x.is_sign_negative() {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Numeric equality under [`compare`].
pub fn num_eq(a: Numeric<'_>, b: Numeric<'_>) -> bool {
    compare(a, b) == Ordering::Equal
}

/// Binary arithmetic operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }

    /// Whether integer operands always give an integer result.
    pub fn preserves_integers(self) -> bool {
        !matches!(self, ArithOp::Div)
    }
}

/// Apply `op` to two concrete numbers.
pub fn arith(op: ArithOp, a: Numeric<'_>, b: Numeric<'_>) -> EvalResult {
    match op {
        ArithOp::Add => Ok(add(a, b)),
        ArithOp::Sub => Ok(sub(a, b)),
        ArithOp::Mul => Ok(mul(a, b)),
        ArithOp::Div => div(a, b),
    }
}

enum Level {
    Int(i64, i64),
    Float(f64, f64),
    Integer(BigInt, BigInt),
    Rational(BigRational, BigRational),
}

/// Lift both operands to the lowest representation that holds them.
fn unify(a: Numeric<'_>, b: Numeric<'_>) -> Level {
    if let (Numeric::Int(x), Numeric::Int(y)) = (a, b) {
        return Level::Int(x, y);
    }
    if a.is_float() || b.is_float() {
        return Level::Float(a.to_f64(), b.to_f64());
    }
    if a.is_integer_typed() && b.is_integer_typed() {
        if let (Some(x), Some(y)) = (a.to_bigint(), b.to_bigint()) {
            return Level::Integer(x, y);
        }
    }
    match (a.to_ratio(), b.to_ratio()) {
        (Some(x), Some(y)) => Level::Rational(x, y),
        _ => Level::Float(a.to_f64(), b.to_f64()),
    }
}

pub fn add(a: Numeric<'_>, b: Numeric<'_>) -> Value {
    match unify(a, b) {
        Level::Int(x, y) => x
            .checked_add(y)
            .map_or_else(|| Value::bigint_raw(BigInt::from(x) + y), Value::Int),
        Level::Float(x, y) => Value::Float(x + y),
        Level::Integer(x, y) => normalize_bigint(x + y),
        Level::Rational(x, y) => normalize_ratio(x + y),
    }
}

pub fn sub(a: Numeric<'_>, b: Numeric<'_>) -> Value {
    match unify(a, b) {
        Level::Int(x, y) => x
            .checked_sub(y)
            .map_or_else(|| Value::bigint_raw(BigInt::from(x) - y), Value::Int),
        Level::Float(x, y) => Value::Float(x - y),
        Level::Integer(x, y) => normalize_bigint(x - y),
        Level::Rational(x, y) => normalize_ratio(x - y),
    }
}

pub fn mul(a: Numeric<'_>, b: Numeric<'_>) -> Value {
    match unify(a, b) {
        Level::Int(x, y) => x
            .checked_mul(y)
            .map_or_else(|| Value::bigint_raw(BigInt::from(x) * y), Value::Int),
        Level::Float(x, y) => Value::Float(x * y),
        Level::Integer(x, y) => normalize_bigint(x * y),
        Level::Rational(x, y) => normalize_ratio(x * y),
    }
}

/// Division. Exact operands give an exact quotient; a zero divisor is an
/// error even for floats.
pub fn div(a: Numeric<'_>, b: Numeric<'_>) -> EvalResult {
    if b.is_zero() {
        return Err(division_by_zero());
    }
    Ok(match unify(a, b) {
        Level::Int(x, y) => match x.checked_rem(y) {
            Some(0) => x
                .checked_div(y)
                .map_or_else(|| Value::bigint_raw(BigInt::from(x) / y), Value::Int),
            _ => normalize_ratio(BigRational::new(BigInt::from(x), BigInt::from(y))),
        },
        Level::Float(x, y) => Value::Float(x / y),
        Level::Integer(x, y) => normalize_ratio(BigRational::new(x, y)),
        Level::Rational(x, y) => normalize_ratio(x / y),
    })
}

pub fn negate(a: Numeric<'_>) -> Value {
    sub(Numeric::Int(0), a)
}

pub fn reciprocal(a: Numeric<'_>) -> EvalResult {
    div(Numeric::Int(1), a)
}

/// Extract a concrete number or fail with a type mismatch.
pub fn expect_numeric(value: &Value) -> Result<Numeric<'_>, EvalError> {
    value
        .as_numeric()
        .ok_or_else(|| crate::errors::expected_number(value))
}
