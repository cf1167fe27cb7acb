use super::*;
use crate::range::{Bound, NumInRange, NumRange};
use crate::type_set::TypeSet;
use crate::unknown::any_of;
use num_rational::BigRational;
use pretty_assertions::assert_eq;

fn range(lo: i64, hi: i64) -> Value {
    let r = NumRange::new(
        Some(Bound::new(Value::int(lo), true).unwrap()),
        Some(Bound::new(Value::int(hi), true).unwrap()),
    )
    .unwrap();
    Value::num_in_range(NumInRange::new(r, None).unwrap())
}

fn int_range(lo: i64, hi: i64) -> Value {
    let r = NumRange::new(
        Some(Bound::new(Value::int(lo), true).unwrap()),
        Some(Bound::new(Value::int(hi), true).unwrap()),
    )
    .unwrap();
    Value::num_in_range(NumInRange::new(r, Some(TypeSet::integer())).unwrap())
}

fn typed(names: &[&str]) -> Value {
    Value::typed_unknown(TypeSet::new(names.iter().copied())).unwrap()
}

#[test]
fn numbers_compare_across_representations() {
    assert_eq!(equals(&Value::int(1), &Value::float(1.0)).unwrap(), Ternary::True);
    assert_eq!(equals(&Value::int(1), &Value::int(2)).unwrap(), Ternary::False);
}

#[test]
fn atoms_compare_exactly() {
    let s = Value::string("a");
    assert_eq!(equals(&s, &Value::string("a")).unwrap(), Ternary::True);
    assert_eq!(equals(&s, &Value::symbol("a")).unwrap(), Ternary::False);
    assert_eq!(equals(&Value::Nil, &Value::Bool(false)).unwrap(), Ternary::False);
}

#[test]
fn lists_compare_elementwise() {
    let a = Value::list([Value::int(1), Value::int(2)]);
    let b = Value::list([Value::int(1), Value::float(2.0)]);
    let c = Value::list([Value::int(1), Value::int(2), Value::int(3)]);
    assert_eq!(equals(&a, &b).unwrap(), Ternary::True);
    assert_eq!(equals(&a, &c).unwrap(), Ternary::False);
    assert_eq!(equals(&a, &Value::int(1)).unwrap(), Ternary::False);
}

#[test]
fn lists_with_unknown_elements_are_maybe_equal() {
    let a = Value::list([Value::int(1), Value::unknown()]);
    let b = Value::list([Value::int(1), Value::int(2)]);
    assert_eq!(equals(&a, &b).unwrap(), Ternary::Maybe);

    // A definite mismatch elsewhere still decides it.
    let c = Value::list([Value::int(9), Value::int(2)]);
    assert_eq!(equals(&a, &c).unwrap(), Ternary::False);
    assert!(intersects(&a, &b).unwrap());
}

#[test]
fn any_of_equality() {
    let zero_or_one = any_of([Value::int(0), Value::int(1)]).unwrap();
    assert_eq!(equals(&zero_or_one, &Value::int(1)).unwrap(), Ternary::Maybe);
    assert_eq!(equals(&zero_or_one, &Value::int(5)).unwrap(), Ternary::False);
    assert_eq!(equals(&Value::int(1), &zero_or_one).unwrap(), Ternary::Maybe);
}

#[test]
fn candidates_equal_across_representations() {
    let zero_or_one = any_of([Value::int(0), Value::int(1)]).unwrap();
    assert_eq!(equals(&Value::float(1.0), &zero_or_one).unwrap(), Ternary::Maybe);
    assert!(intersects(&Value::float(1.0), &zero_or_one).unwrap());
    assert_eq!(equals(&Value::float(2.0), &zero_or_one).unwrap(), Ternary::False);

    let half = Value::rational(BigRational::new(1.into(), 2.into()));
    let half_or_two = any_of([Value::float(0.5), Value::int(2)]).unwrap();
    assert_eq!(equals(&half, &half_or_two).unwrap(), Ternary::Maybe);

    assert_eq!(equals(&Value::float(3.0), &typed(&["int"])).unwrap(), Ternary::Maybe);
    assert_eq!(equals(&Value::float(3.0), &typed(&["string"])).unwrap(), Ternary::False);
}

#[test]
fn integer_ranges_match_integral_floats() {
    let ints = int_range(0, 10);
    assert!(intersects(&ints, &Value::float(3.0)).unwrap());
    assert!(!intersects(&ints, &Value::float(3.5)).unwrap());
    assert!(!intersects(&ints, &Value::float(11.0)).unwrap());
}

#[test]
fn integer_ranges_need_an_integer_in_the_overlap() {
    let fractional = Value::num_in_range(
        NumInRange::new(
            NumRange::new(
                Some(Bound::new(Value::float(0.2), true).unwrap()),
                Some(Bound::new(Value::float(0.8), true).unwrap()),
            )
            .unwrap(),
            Some(TypeSet::integer()),
        )
        .unwrap(),
    );
    assert!(!intersects(&fractional, &range(0, 1)).unwrap());
    assert!(!intersects(&range(0, 1), &fractional).unwrap());
    assert!(intersects(&int_range(0, 1), &range(1, 5)).unwrap());
}

#[test]
fn fully_unknown_intersects_everything() {
    for v in [Value::Nil, Value::int(3), Value::string("s"), range(0, 1)] {
        assert!(intersects(&Value::unknown(), &v).unwrap());
        assert!(intersects(&v, &Value::unknown()).unwrap());
    }
}

#[test]
fn disjoint_types_never_intersect() {
    assert!(!intersects(&typed(&["string"]), &Value::int(3)).unwrap());
    assert!(!intersects(&range(0, 10), &Value::string("5")).unwrap());
    assert!(intersects(&typed(&["int", "string"]), &Value::int(3)).unwrap());
}

#[test]
fn ranges_intersect_on_overlap() {
    assert!(intersects(&range(0, 5), &range(5, 9)).unwrap());
    assert!(!intersects(&range(0, 4), &range(5, 9)).unwrap());
    assert!(intersects(&range(0, 5), &Value::int(3)).unwrap());
    assert!(!intersects(&Value::int(6), &range(0, 5)).unwrap());
}

#[test]
fn range_against_any_of_tries_candidates() {
    let v = any_of([Value::int(-1), Value::int(7)]).unwrap();
    assert!(intersects(&range(5, 9), &v).unwrap());
    assert!(!intersects(&range(0, 5), &v).unwrap());
}

#[test]
fn degenerate_range_is_its_point() {
    assert_eq!(equals(&range(4, 4), &Value::int(4)).unwrap(), Ternary::True);
    assert_eq!(equals(&range(4, 4), &Value::int(5)).unwrap(), Ternary::False);
    assert_eq!(equals(&range(3, 4), &Value::int(4)).unwrap(), Ternary::Maybe);
}

#[test]
fn opt_cons_matches_either_shape() {
    let o = Value::opt_cons(Value::int(1), Value::Nil);
    assert!(intersects(&o, &Value::Nil).unwrap());
    assert!(intersects(&o, &Value::list([Value::int(1)])).unwrap());
    assert!(!intersects(&o, &Value::list([Value::int(2)])).unwrap());
}

#[test]
fn truthiness_of_values() {
    assert_eq!(truthiness(&Value::Nil), Ternary::False);
    assert_eq!(truthiness(&Value::Bool(false)), Ternary::False);
    assert_eq!(truthiness(&Value::int(0)), Ternary::True);
    assert_eq!(truthiness(&Value::unknown()), Ternary::Maybe);
    assert_eq!(truthiness(&Value::maybe()), Ternary::Maybe);
    assert_eq!(truthiness(&range(0, 1)), Ternary::True);
    assert_eq!(truthiness(&typed(&["int"])), Ternary::True);
    assert_eq!(truthiness(&typed(&["int", "nil"])), Ternary::Maybe);

    let all_truthy = any_of([Value::int(1), Value::string("x")]).unwrap();
    assert_eq!(truthiness(&all_truthy), Ternary::True);
    assert_eq!(
        truthiness(&Value::opt_cons(Value::int(1), Value::Nil)),
        Ternary::Maybe
    );
}

#[test]
fn unknowns_are_never_falsey() {
    assert!(!Value::unknown().is_falsey());
    assert!(!Value::maybe().is_falsey());
}
