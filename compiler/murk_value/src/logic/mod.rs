//! Equality and intersection under uncertainty.
//!
//! [`equals`] answers "must these be equal?" with a [`Ternary`];
//! [`intersects`] answers "could these be equal?". `intersects` eliminates
//! one kind of uncertainty per step, in a fixed order:
//!
//! 1. fully unknown on either side: yes;
//! 2. both sides have known type sets and they are disjoint: no;
//! 3. either side is a typed unknown (no value information left): yes;
//! 4. either side is a disjunction (`any-of`, `opt-cons`): any alternative;
//! 5. numeric intervals against intervals or numbers: overlap/containment.
//!
//! Anything reaching the end is an [`IntersectionUnresolvable`] defect.
//!
//! [`IntersectionUnresolvable`]: crate::EvalErrorKind::IntersectionUnresolvable

use crate::errors::{intersection_unresolvable, EvalError};
use crate::identity::atom_eq;
use crate::numeric;
use crate::stack::ensure_sufficient_stack;
use crate::ternary::Ternary;
use crate::unknown::{possible_types, Unknown};
use crate::value::{type_names, Value};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

/// Whether `a` and `b` are equal.
///
/// Concrete numbers compare by value across representations, other atoms by
/// exact value. Lists compare element-wise; a `False` anywhere decides the
/// whole comparison. With an unknown on either side the answer is `Maybe`
/// if the two could be equal and `False` otherwise, except that an unknown
/// narrowed to a single possible value compares as that value.
pub fn equals(a: &Value, b: &Value) -> Result<Ternary, EvalError> {
    let (mut a, mut b) = (a, b);
    let mut acc = Ternary::True;
    loop {
        if let (Value::Cons(x), Value::Cons(y)) = (a, b) {
            match ensure_sufficient_stack(|| equals(x.head(), y.head()))? {
                Ternary::False => return Ok(Ternary::False),
                head => acc = acc.and(head),
            }
            a = x.tail();
            b = y.tail();
            continue;
        }
        return Ok(match equals_shallow(a, b)? {
            Ternary::False => Ternary::False,
            last => acc.and(last),
        });
    }
}

fn equals_shallow(a: &Value, b: &Value) -> Result<Ternary, EvalError> {
    if let (Some(x), Some(y)) = (a.as_numeric(), b.as_numeric()) {
        return Ok(Ternary::from_bool(numeric::num_eq(x, y)));
    }
    if let Some(same) = atom_eq(a, b) {
        return Ok(Ternary::from_bool(same));
    }
    if a.is_unknown() || b.is_unknown() {
        if let Some(only) = a.as_unknown().and_then(Unknown::singleton) {
            return equals(only, b);
        }
        if let Some(only) = b.as_unknown().and_then(Unknown::singleton) {
            return equals(a, only);
        }
        return Ok(if intersects(a, b)? {
            Ternary::Maybe
        } else {
            Ternary::False
        });
    }
    Ok(Ternary::False)
}

/// Whether `a` and `b` could denote the same value.
pub fn intersects(a: &Value, b: &Value) -> Result<bool, EvalError> {
    ensure_sufficient_stack(|| intersects_inner(a, b))
}

fn intersects_inner(a: &Value, b: &Value) -> Result<bool, EvalError> {
    let (ua, ub) = (a.as_unknown(), b.as_unknown());

    if ua.is_none() && ub.is_none() {
        return match equals(a, b)? {
            Ternary::True => Ok(true),
            Ternary::False => Ok(false),
            // Lists holding unknowns may or may not be equal.
            Ternary::Maybe if !a.uncertain().is_false() || !b.uncertain().is_false() => Ok(true),
            Ternary::Maybe => Err(intersection_unresolvable(a, b)),
        };
    }

    // 1. Top of the lattice.
    if matches!(ua, Some(Unknown::Fully)) || matches!(ub, Some(Unknown::Fully)) {
        return Ok(true);
    }

    // 2. Type exclusion. Numeric representations never exclude each other.
    if let (Some(ta), Some(tb)) = (possible_types(a), possible_types(b)) {
        if !ta.may_share_values(&tb) {
            return Ok(false);
        }
    }

    // 3. Type compatibility is all a typed unknown can offer.
    if matches!(ua, Some(Unknown::Typed(_))) || matches!(ub, Some(Unknown::Typed(_))) {
        return Ok(true);
    }

    // 4. Disjunctions: try each alternative.
    if let Some(alternatives) = ua.and_then(Unknown::alternatives) {
        for alt in &alternatives {
            if intersects(alt, b)? {
                return Ok(true);
            }
        }
        return Ok(false);
    }
    if let Some(alternatives) = ub.and_then(Unknown::alternatives) {
        for alt in &alternatives {
            if intersects(a, alt)? {
                return Ok(true);
            }
        }
        return Ok(false);
    }

    // 5. Intervals.
    match (ua, ub) {
        (Some(Unknown::NumInRange(x)), Some(Unknown::NumInRange(y))) => {
            Ok(x.overlaps(y))
        }
        (Some(Unknown::NumInRange(r)), None) => Ok(r.may_equal(b)),
        (None, Some(Unknown::NumInRange(r))) => Ok(r.may_equal(a)),
        _ => Err(intersection_unresolvable(a, b)),
    }
}

/// How a value behaves as a condition.
///
/// Concrete values are false exactly when falsey. Unknowns are decided by
/// what they may hold: an `any-of` of truthy numbers is `True`, one that
/// might be nil is `Maybe`.
pub fn truthiness(value: &Value) -> Ternary {
    match value {
        Value::Unknown(u) => match u {
            Unknown::Fully => Ternary::Maybe,
            Unknown::AnyOf(any) => {
                let mut candidates = any.candidates().iter().map(truthiness);
                let first = candidates.next().unwrap_or(Ternary::Maybe);
                candidates.fold(first, Ternary::agree)
            }
            Unknown::NumInRange(_) => Ternary::True,
            Unknown::Typed(types) => {
                if types.contains(type_names::NIL) || types.contains(type_names::BOOL) {
                    Ternary::Maybe
                } else {
                    Ternary::True
                }
            }
            Unknown::OptCons(o) => Ternary::True.agree(ensure_sufficient_stack(|| truthiness(o.tail()))),
        },
        concrete => Ternary::from_bool(!concrete.is_falsey()),
    }
}
