use super::*;
use pretty_assertions::assert_eq;
use std::cmp::Ordering;

fn n(v: &Value) -> Numeric<'_> {
    v.as_numeric().unwrap_or_else(|| panic!("{v} is not a number"))
}

#[test]
fn int_overflow_promotes_to_bigint() {
    let max = Value::int(i64::MAX);
    let sum = add(n(&max), Numeric::Int(1));
    assert_eq!(sum.type_name(), "bigint");
    assert_eq!(sum.to_string(), "9223372036854775808");

    // And comes back down when it fits again.
    let back = sub(n(&sum), Numeric::Int(1));
    assert_eq!(back, Value::int(i64::MAX));
}

#[test]
fn exact_division_stays_integral() {
    assert_eq!(div(Numeric::Int(6), Numeric::Int(3)).unwrap(), Value::int(2));
}

#[test]
fn inexact_division_gives_ratio() {
    let q = div(Numeric::Int(1), Numeric::Int(3)).unwrap();
    assert_eq!(q.type_name(), "ratio");
    assert_eq!(q.to_string(), "1/3");

    let sum = add(n(&q), n(&q));
    let total = add(n(&sum), n(&q));
    assert_eq!(total, Value::int(1));
}

#[test]
fn min_over_minus_one_does_not_overflow() {
    let q = div(Numeric::Int(i64::MIN), Numeric::Int(-1)).unwrap();
    assert_eq!(q.to_string(), "9223372036854775808");
}

#[test]
fn division_by_zero_is_an_error() {
    let err = div(Numeric::Int(1), Numeric::Int(0)).unwrap_err();
    assert_eq!(err.kind, crate::errors::EvalErrorKind::DivisionByZero);
    assert!(div(Numeric::Float(1.0), Numeric::Float(0.0)).is_err());
}

#[test]
fn float_is_contagious() {
    assert_eq!(add(Numeric::Int(1), Numeric::Float(0.5)), Value::float(1.5));
    assert_eq!(mul(Numeric::Float(2.0), Numeric::Int(3)), Value::float(6.0));
}

#[test]
fn compare_across_representations() {
    let third = div(Numeric::Int(1), Numeric::Int(3)).unwrap();
    let big = add(Numeric::Int(i64::MAX), Numeric::Int(10));

    assert_eq!(compare(Numeric::Int(1), Numeric::Float(1.0)), Ordering::Equal);
    assert_eq!(compare(n(&third), Numeric::Float(0.3)), Ordering::Greater);
    assert_eq!(compare(Numeric::Int(i64::MAX), n(&big)), Ordering::Less);
    assert_eq!(compare(n(&big), Numeric::Float(f64::INFINITY)), Ordering::Less);
    assert_eq!(
        compare(Numeric::Float(f64::NEG_INFINITY), Numeric::Int(i64::MIN)),
        Ordering::Less
    );
}

#[test]
fn signed_zeros_are_equal() {
    let neg = Numeric::Float(-0.0);
    assert_eq!(compare(neg, Numeric::Int(0)), Ordering::Equal);
    assert_eq!(compare(neg, Numeric::Float(0.0)), Ordering::Equal);
    assert_eq!(compare(Numeric::Float(0.0), neg), Ordering::Equal);
    assert!(num_eq(neg, Numeric::Float(0.0)));
    assert_eq!(compare(neg, Numeric::Float(f64::MIN_POSITIVE)), Ordering::Less);

    let unit = crate::range::NumRange::new(
        Some(crate::range::Bound::new(Value::float(0.0), true).unwrap()),
        Some(crate::range::Bound::new(Value::int(1), true).unwrap()),
    )
    .unwrap();
    assert!(unit.contains(&Value::float(-0.0)));
}

#[test]
fn compare_is_reflexive_for_nan() {
    assert_eq!(
        compare(Numeric::Float(f64::NAN), Numeric::Float(f64::NAN)),
        Ordering::Equal
    );
}

#[test]
fn conversions_are_exact_or_absent() {
    assert_eq!(Numeric::Float(4.0).to_i64(), Some(4));
    assert_eq!(Numeric::Float(4.5).to_i64(), None);
    assert_eq!(Numeric::Float(f64::NAN).to_ratio(), None);

    let third = div(Numeric::Int(1), Numeric::Int(3)).unwrap();
    assert_eq!(n(&third).to_bigint(), None);
}

#[test]
fn signum() {
    assert_eq!(Numeric::Int(-3).signum(), Ordering::Less);
    assert_eq!(Numeric::Float(0.0).signum(), Ordering::Equal);
    let third = div(Numeric::Int(1), Numeric::Int(3)).unwrap();
    assert_eq!(n(&third).signum(), Ordering::Greater);
}
