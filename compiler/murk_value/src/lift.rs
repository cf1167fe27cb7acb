//! Concrete operations lifted over uncertain operands.
//!
//! - Disjunctions (`any-of`, `opt-cons`) expand: the operation runs on every
//!   combination of alternatives and the results are gathered into a new
//!   `any-of`, which the candidate limit keeps bounded.
//! - Intervals and concrete numbers combine by interval arithmetic.
//! - Anything only known to be numeric yields a typed unknown.

use crate::errors::{division_by_zero, expected_number, EvalError, EvalResult};
use crate::numeric::{self, ArithOp};
use crate::range::{NumInRange, NumRange};
use crate::stack::ensure_sufficient_stack;
use crate::ternary::Ternary;
use crate::type_set::TypeSet;
use crate::unknown::{any_of, Unknown};
use crate::value::Value;

/// Ordering predicate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }
}

/// How a non-disjunctive operand takes part in lifted arithmetic.
enum Shape {
    /// A number inside a known interval.
    Interval { range: NumRange, integer: bool },
    /// A number with nothing known about its magnitude.
    Opaque { integer: bool },
}

fn shape(value: &Value) -> Result<Shape, EvalError> {
    if let Some(n) = value.as_numeric() {
        return Ok(match NumRange::point(value) {
            Ok(range) => Shape::Interval {
                range,
                integer: n.is_integer_typed(),
            },
            // NaN and infinities have no finite interval.
            Err(_) => Shape::Opaque { integer: false },
        });
    }
    match value.as_unknown() {
        Some(Unknown::NumInRange(r)) => Ok(Shape::Interval {
            range: r.range().clone(),
            integer: r.types().is_some_and(|t| t.is_subset(&TypeSet::integer())),
        }),
        Some(Unknown::Fully) => Ok(Shape::Opaque { integer: false }),
        Some(Unknown::Typed(types)) => {
            let numeric_part = types.intersection(&TypeSet::numeric());
            if numeric_part.is_empty() {
                Err(expected_number(value))
            } else {
                Ok(Shape::Opaque {
                    integer: numeric_part.is_subset(&TypeSet::integer()),
                })
            }
        }
        _ => Err(expected_number(value)),
    }
}

fn result_types(op: ArithOp, a_integer: bool, b_integer: bool) -> TypeSet {
    if a_integer && b_integer && op.preserves_integers() {
        TypeSet::integer()
    } else {
        TypeSet::numeric()
    }
}

/// `a op b` for possibly uncertain operands.
pub fn arith(op: ArithOp, a: &Value, b: &Value) -> EvalResult {
    ensure_sufficient_stack(|| arith_inner(op, a, b))
}

fn arith_inner(op: ArithOp, a: &Value, b: &Value) -> EvalResult {
    if let (Some(x), Some(y)) = (a.as_numeric(), b.as_numeric()) {
        return numeric::arith(op, x, y);
    }
    if let Some(alternatives) = a.as_unknown().and_then(Unknown::alternatives) {
        let results = alternatives
            .iter()
            .map(|alt| arith(op, alt, b))
            .collect::<Result<Vec<_>, _>>()?;
        return any_of(results);
    }
    if let Some(alternatives) = b.as_unknown().and_then(Unknown::alternatives) {
        let results = alternatives
            .iter()
            .map(|alt| arith(op, a, alt))
            .collect::<Result<Vec<_>, _>>()?;
        return any_of(results);
    }

    match (shape(a)?, shape(b)?) {
        (
            Shape::Interval {
                range: ra,
                integer: ia,
            },
            Shape::Interval {
                range: rb,
                integer: ib,
            },
        ) => {
            let range = match op {
                ArithOp::Add => ra.add(&rb)?,
                ArithOp::Sub => ra.sub(&rb)?,
                ArithOp::Mul => ra.mul(&rb)?,
                ArithOp::Div => ra.div(&rb)?,
            };
            let types = (ia && ib && op.preserves_integers()).then(TypeSet::integer);
            Ok(Value::num_in_range(NumInRange::new(range, types)?))
        }
        (Shape::Opaque { integer: ia }, Shape::Interval { range, integer: ib }) => {
            if op == ArithOp::Div && range.contains_zero() {
                return Err(division_by_zero());
            }
            Value::typed_unknown(result_types(op, ia, ib))
        }
        (Shape::Interval { integer: ia, .. }, Shape::Opaque { integer: ib })
        | (Shape::Opaque { integer: ia }, Shape::Opaque { integer: ib }) => {
            Value::typed_unknown(result_types(op, ia, ib))
        }
    }
}

/// `a op b` as a truth value for possibly uncertain operands.
pub fn compare(op: CompareOp, a: &Value, b: &Value) -> Result<Ternary, EvalError> {
    ensure_sufficient_stack(|| compare_inner(op, a, b))
}

fn compare_inner(op: CompareOp, a: &Value, b: &Value) -> Result<Ternary, EvalError> {
    if let (Some(x), Some(y)) = (a.as_numeric(), b.as_numeric()) {
        let ord = numeric::compare(x, y);
        return Ok(Ternary::from_bool(match op {
            CompareOp::Lt => ord.is_lt(),
            CompareOp::Gt => ord.is_gt(),
            CompareOp::Le => ord.is_le(),
            CompareOp::Ge => ord.is_ge(),
        }));
    }
    if let Some(alternatives) = a.as_unknown().and_then(Unknown::alternatives) {
        return agree_over(&alternatives, |alt| compare(op, alt, b));
    }
    if let Some(alternatives) = b.as_unknown().and_then(Unknown::alternatives) {
        return agree_over(&alternatives, |alt| compare(op, a, alt));
    }

    match (shape(a)?, shape(b)?) {
        (Shape::Interval { range: ra, .. }, Shape::Interval { range: rb, .. }) => Ok(match op {
            CompareOp::Lt => ra.less_than(&rb),
            CompareOp::Gt => rb.less_than(&ra),
            CompareOp::Le => rb.less_than(&ra).not(),
            CompareOp::Ge => ra.less_than(&rb).not(),
        }),
        _ => Ok(Ternary::Maybe),
    }
}

fn agree_over(
    alternatives: &[Value],
    mut f: impl FnMut(&Value) -> Result<Ternary, EvalError>,
) -> Result<Ternary, EvalError> {
    let mut acc: Option<Ternary> = None;
    for alt in alternatives {
        let t = f(alt)?;
        let combined = acc.map_or(t, |prev| prev.agree(t));
        if combined.is_maybe() {
            return Ok(Ternary::Maybe);
        }
        acc = Some(combined);
    }
    Ok(acc.unwrap_or(Ternary::Maybe))
}

/// Apply `f` to every alternative of a disjunctive value, gathering the
/// results into an `any-of`. Other values are passed to `f` directly.
pub fn map_alternatives<F>(value: &Value, f: &F) -> EvalResult
where
    F: Fn(&Value) -> EvalResult,
{
    match value.as_unknown().and_then(Unknown::alternatives) {
        Some(alternatives) => {
            let results = alternatives
                .iter()
                .map(|alt| ensure_sufficient_stack(|| map_alternatives(alt, f)))
                .collect::<Result<Vec<_>, _>>()?;
            any_of(results)
        }
        None => f(value),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::range::Bound;
    use pretty_assertions::assert_eq;

    fn closed(lo: i64, hi: i64) -> Value {
        let r = NumRange::new(
            Some(Bound::new(Value::int(lo), true).unwrap()),
            Some(Bound::new(Value::int(hi), true).unwrap()),
        )
        .unwrap();
        Value::num_in_range(NumInRange::new(r, Some(TypeSet::integer())).unwrap())
    }

    #[test]
    fn cartesian_expansion_over_any_of() {
        let choices = any_of([Value::int(10), Value::int(30)]).unwrap();
        let product = arith(ArithOp::Mul, &Value::int(2), &choices).unwrap();
        assert_eq!(product, any_of([Value::int(20), Value::int(60)]).unwrap());

        let pairs = any_of([Value::int(1), Value::int(2)]).unwrap();
        let sums = arith(ArithOp::Add, &pairs, &pairs).unwrap();
        assert_eq!(
            sums,
            any_of([Value::int(2), Value::int(3), Value::int(4)]).unwrap()
        );
    }

    #[test]
    fn range_arithmetic_keeps_integer_types() {
        let sum = arith(ArithOp::Add, &closed(0, 10), &Value::int(5)).unwrap();
        assert_eq!(sum.to_string(), "#num-in-range(bigint int)[5, 15]");

        let quotient = arith(ArithOp::Div, &closed(2, 4), &Value::int(2)).unwrap();
        assert_eq!(quotient.to_string(), "#num-in-range[1, 2]");
    }

    #[test]
    fn unknown_operands_give_typed_unknowns() {
        let r = arith(ArithOp::Add, &Value::unknown(), &Value::int(1)).unwrap();
        assert_eq!(r, Value::typed_unknown(TypeSet::numeric()).unwrap());

        let ints = Value::typed_unknown(TypeSet::single("int")).unwrap();
        let r = arith(ArithOp::Mul, &ints, &Value::int(3)).unwrap();
        assert_eq!(r, Value::typed_unknown(TypeSet::integer()).unwrap());
    }

    #[test]
    fn non_numbers_are_rejected() {
        assert!(arith(ArithOp::Add, &Value::string("a"), &Value::int(1)).is_err());
        let text = Value::typed_unknown(TypeSet::single("string")).unwrap();
        assert!(arith(ArithOp::Add, &text, &Value::int(1)).is_err());
    }

    #[test]
    fn division_by_uncertain_zero() {
        let err = arith(ArithOp::Div, &Value::unknown(), &closed(-1, 1)).unwrap_err();
        assert_eq!(err.kind, crate::EvalErrorKind::DivisionByZero);
        let any = any_of([Value::int(0), Value::int(1)]).unwrap();
        assert!(arith(ArithOp::Div, &Value::int(1), &any).is_err());
    }

    #[test]
    fn comparisons_over_uncertainty() {
        let low = any_of([Value::int(1), Value::int(2)]).unwrap();
        assert_eq!(compare(CompareOp::Lt, &low, &Value::int(5)).unwrap(), Ternary::True);
        assert_eq!(compare(CompareOp::Lt, &low, &Value::int(2)).unwrap(), Ternary::Maybe);
        assert_eq!(compare(CompareOp::Ge, &closed(5, 9), &Value::int(5)).unwrap(), Ternary::True);
        assert_eq!(compare(CompareOp::Gt, &closed(5, 9), &Value::int(9)).unwrap(), Ternary::False);
        assert_eq!(
            compare(CompareOp::Le, &Value::unknown(), &Value::int(0)).unwrap(),
            Ternary::Maybe
        );
    }

    #[test]
    fn map_over_alternatives() {
        let v = any_of([Value::int(1), Value::int(2)]).unwrap();
        let doubled = map_alternatives(&v, &|x| arith(ArithOp::Mul, x, &Value::int(2))).unwrap();
        assert_eq!(doubled, any_of([Value::int(2), Value::int(4)]).unwrap());
        assert_eq!(
            map_alternatives(&Value::int(3), &|x| Ok(x.clone())).unwrap(),
            Value::int(3)
        );
    }
}
