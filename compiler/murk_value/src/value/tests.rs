use super::*;
use crate::unknown::any_of;
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

#[test]
fn display_atoms() {
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::boolean(true).to_string(), "#t");
    assert_eq!(Value::boolean(false).to_string(), "#f");
    assert_eq!(Value::int(-7).to_string(), "-7");
    assert_eq!(Value::float(2.0).to_string(), "2.0");
    assert_eq!(Value::float(0.5).to_string(), "0.5");
    assert_eq!(Value::string("a\"b\n").to_string(), r#""a\"b\n""#);
    assert_eq!(Value::symbol("foo").to_string(), "foo");
    assert_eq!(
        Value::rational(BigRational::new(BigInt::from(6), BigInt::from(4))).to_string(),
        "3/2"
    );
}

#[test]
fn display_lists() {
    let proper = Value::list([Value::int(1), Value::list([Value::int(2)]), Value::Nil]);
    assert_eq!(proper.to_string(), "(1 (2) nil)");
    let dotted = Value::list_with_tail([Value::int(1), Value::int(2)], Value::int(3));
    assert_eq!(dotted.to_string(), "(1 2 . 3)");
    assert_eq!(Value::list(Vec::new()), Value::Nil);
}

#[test]
fn numeric_factories_normalize() {
    assert!(matches!(Value::integer(BigInt::from(5)), Value::Int(5)));
    let big = BigInt::from(i64::MAX) + 1;
    assert!(matches!(Value::integer(big), Value::BigInt(_)));
    let whole = BigRational::new(BigInt::from(8), BigInt::from(4));
    assert!(matches!(Value::rational(whole), Value::Int(2)));
}

#[test]
fn only_nil_and_false_are_falsey() {
    assert!(Value::Nil.is_falsey());
    assert!(Value::boolean(false).is_falsey());
    assert!(!Value::int(0).is_falsey());
    assert!(!Value::string("").is_falsey());
    assert!(!Value::list([Value::Nil]).is_falsey());
}

#[test]
fn uncertainty_of_structures() {
    assert_eq!(Value::int(1).uncertain(), Ternary::False);
    assert_eq!(Value::unknown().uncertain(), Ternary::True);
    assert_eq!(Value::list([Value::int(1)]).uncertain(), Ternary::False);
    assert_eq!(
        Value::list([Value::int(1), Value::unknown()]).uncertain(),
        Ternary::Maybe
    );
    assert_eq!(
        Value::list_with_tail([Value::int(1)], Value::unknown()).uncertain(),
        Ternary::Maybe
    );
}

#[test]
fn type_names_of_uncertain_values() {
    let any = any_of([Value::int(1), Value::string("x")]).unwrap();
    assert_eq!(any.type_name(), "unknown");
    assert_eq!(Value::list([any]).type_name(), "cons");
}

#[test]
fn maybe_is_a_ternary() {
    assert_eq!(Value::maybe().as_ternary(), Some(Ternary::Maybe));
    assert_eq!(Value::from_ternary(Ternary::True), Value::boolean(true));
    assert_eq!(Value::int(1).as_ternary(), None);
}

#[test]
fn to_vec_requires_a_proper_list() {
    let xs = Value::list([Value::int(1), Value::int(2)]);
    assert_eq!(xs.to_vec().unwrap(), vec![Value::int(1), Value::int(2)]);
    assert!(Value::Nil.to_vec().unwrap().is_empty());
    let dotted = Value::cons(Value::int(1), Value::int(2));
    assert!(dotted.to_vec().is_err());
}

#[test]
fn iterator_exposes_the_tail() {
    let dotted = Value::list_with_tail([Value::int(1)], Value::symbol("rest"));
    let mut iter = dotted.iter();
    assert_eq!(iter.next(), Some(&Value::int(1)));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.rest(), &Value::symbol("rest"));
}

#[test]
fn long_lists_drop_and_compare_without_deep_recursion() {
    let build = || Value::list((0..200_000).map(Value::int).collect::<Vec<_>>());
    let a = build();
    let b = build();
    assert_eq!(a, b);
    assert_eq!(a.iter().count(), 200_000);
    drop(a);
    drop(b);
}

#[test]
fn shared_tails_survive_dropping_one_owner() {
    let tail = Value::list([Value::int(2), Value::int(3)]);
    let first = Value::cons(Value::int(1), tail.clone());
    drop(first);
    assert_eq!(tail.to_string(), "(2 3)");
}

#[test]
fn deeply_nested_heads_drop_iteratively() {
    let mut nested = Value::Nil;
    for _ in 0..200_000 {
        nested = Value::list([nested]);
    }
    drop(nested);
}
