//! Exact structural identity and content hashing.
//!
//! This is representation equality, not the uncertainty-aware `equals` of
//! the logic engine: `1` and `1.0` are different values here, and two
//! unknowns are identical only when they describe the same set in the same
//! shape. Candidate deduplication and hashed containers build on it.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;

use crate::heap::Heap;
use crate::range::{Bound, NumRange};
use crate::stack::ensure_sufficient_stack;
use crate::unknown::Unknown;
use crate::value::Value;

/// Equality of two atoms, or `None` if either is not an atom.
pub fn atom_eq(a: &Value, b: &Value) -> Option<bool> {
    if !a.is_atom() || !b.is_atom() {
        return None;
    }
    Some(same_value(a, b))
}

/// Exact structural identity.
pub fn same_value(a: &Value, b: &Value) -> bool {
    let (mut a, mut b) = (a, b);
    loop {
        match (a, b) {
            (Value::Cons(x), Value::Cons(y)) => {
                if Heap::ptr_eq(x, y) {
                    return true;
                }
                if !ensure_sufficient_stack(|| same_value(x.head(), y.head())) {
                    return false;
                }
                a = x.tail();
                b = y.tail();
            }
            _ => return same_shallow(a, b),
        }
    }
}

fn same_shallow(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::Ratio(x), Value::Ratio(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Unknown(x), Value::Unknown(y)) => same_unknown(x, y),
        (Value::Function(x), Value::Function(y)) | (Value::Macro(x), Value::Macro(y)) => {
            Heap::ptr_eq(x, y)
        }
        (Value::Builtin(x), Value::Builtin(y)) => Heap::ptr_eq(x, y),
        (Value::SpecialForm(x), Value::SpecialForm(y)) => Heap::ptr_eq(x, y),
        _ => false,
    }
}

fn same_unknown(a: &Unknown, b: &Unknown) -> bool {
    match (a, b) {
        (Unknown::Fully, Unknown::Fully) => true,
        (Unknown::AnyOf(x), Unknown::AnyOf(y)) => {
            // Candidates are deduplicated, so equal length plus one-way
            // containment is set equality.
            x.len() == y.len()
                && x.candidates()
                    .iter()
                    .all(|c| y.candidates().iter().any(|d| same_value(c, d)))
        }
        (Unknown::NumInRange(x), Unknown::NumInRange(y)) => {
            same_range(x.range(), y.range()) && x.types() == y.types()
        }
        (Unknown::Typed(x), Unknown::Typed(y)) => x == y,
        (Unknown::OptCons(x), Unknown::OptCons(y)) => {
            same_value(x.head(), y.head()) && same_value(x.tail(), y.tail())
        }
        _ => false,
    }
}

fn same_bound(a: Option<&Bound>, b: Option<&Bound>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x.is_inclusive() == y.is_inclusive() && same_value(x.value(), y.value()),
        _ => false,
    }
}

fn same_range(a: &NumRange, b: &NumRange) -> bool {
    same_bound(a.low(), b.low()) && same_bound(a.high(), b.high())
}

/// Hash consistent with [`same_value`]: identical values hash equally.
pub fn content_hash(value: &Value) -> u64 {
    let mut hasher = FxHasher::default();
    hash_into(value, &mut hasher);
    hasher.finish()
}

fn hash_into(value: &Value, state: &mut FxHasher) {
    let mut current = value;
    while let Value::Cons(cell) = current {
        state.write_u8(0xC0);
        state.write_u64(ensure_sufficient_stack(|| content_hash(cell.head())));
        current = cell.tail();
    }
    hash_shallow(current, state);
}

fn hash_shallow(value: &Value, state: &mut FxHasher) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Nil | Value::Cons(_) => {}
        Value::Bool(b) => b.hash(state),
        Value::Int(n) => n.hash(state),
        Value::Float(x) => x.to_bits().hash(state),
        Value::BigInt(n) => n.hash(state),
        Value::Ratio(r) => r.hash(state),
        Value::Str(s) => s.hash(state),
        Value::Symbol(name) => name.hash(state),
        Value::Unknown(u) => hash_unknown(u, state),
        Value::Function(l) | Value::Macro(l) => l.addr().hash(state),
        Value::Builtin(b) => b.addr().hash(state),
        Value::SpecialForm(s) => s.addr().hash(state),
    }
}

fn hash_unknown(unknown: &Unknown, state: &mut FxHasher) {
    std::mem::discriminant(unknown).hash(state);
    match unknown {
        Unknown::Fully => {}
        Unknown::AnyOf(any) => {
            // Order-insensitive combination.
            let combined = any
                .candidates()
                .iter()
                .map(content_hash)
                .fold(0u64, u64::wrapping_add);
            state.write_u64(combined);
        }
        Unknown::NumInRange(r) => {
            for bound in [r.range().low(), r.range().high()] {
                match bound {
                    Some(b) => {
                        b.is_inclusive().hash(state);
                        state.write_u64(content_hash(b.value()));
                    }
                    None => state.write_u8(0xFF),
                }
            }
            r.types().hash(state);
        }
        Unknown::Typed(types) => types.hash(state),
        Unknown::OptCons(o) => {
            state.write_u64(content_hash(o.head()));
            state.write_u64(content_hash(o.tail()));
        }
    }
}

/// Insertion-ordered set of values under [`same_value`].
#[derive(Default)]
pub struct DedupSet {
    buckets: FxHashMap<u64, SmallVec<[usize; 2]>>,
    items: Vec<Value>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value`, returning `false` if an identical value was present.
    pub fn insert(&mut self, value: Value) -> bool {
        let bucket = self.buckets.entry(content_hash(&value)).or_default();
        if bucket.iter().any(|&i| same_value(&self.items[i], &value)) {
            return false;
        }
        bucket.push(self.items.len());
        self.items.push(value);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

/// Drop repeated values, keeping first occurrences in order.
pub fn dedup(values: impl IntoIterator<Item = Value>) -> Vec<Value> {
    let mut set = DedupSet::new();
    for value in values {
        set.insert(value);
    }
    set.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn int_and_float_are_distinct_representations() {
        assert!(!same_value(&Value::int(1), &Value::float(1.0)));
        assert_eq!(atom_eq(&Value::int(1), &Value::int(1)), Some(true));
    }

    #[test]
    fn nan_is_identical_to_itself() {
        let nan = Value::float(f64::NAN);
        assert!(same_value(&nan, &nan.clone()));
    }

    #[test]
    fn atom_eq_rejects_structures() {
        let list = Value::list([Value::int(1)]);
        assert_eq!(atom_eq(&list, &list), None);
    }

    #[test]
    fn any_of_identity_ignores_order() {
        let a = Value::any_of_raw(vec![Value::int(1), Value::int(2)]);
        let b = Value::any_of_raw(vec![Value::int(2), Value::int(1)]);
        assert!(same_value(&a, &b));
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn lists_compare_structurally() {
        let a = Value::list([Value::int(1), Value::string("x")]);
        let b = Value::list([Value::int(1), Value::string("x")]);
        assert!(same_value(&a, &b));
        assert_eq!(content_hash(&a), content_hash(&b));
        assert!(!same_value(&a, &Value::list([Value::int(1)])));
    }

    #[test]
    fn dedup_keeps_first_occurrences() {
        let out = dedup([Value::int(3), Value::int(1), Value::int(3), Value::Nil]);
        assert_eq!(out, vec![Value::int(3), Value::int(1), Value::Nil]);
    }
}
