//! Uncertain values.
//!
//! An [`Unknown`] stands for a set of possible concrete values:
//!
//! - `Fully`: anything at all (the top of the lattice).
//! - `AnyOf`: one of an explicit, deduplicated candidate set.
//! - `NumInRange`: a number in an interval, optionally of restricted types.
//! - `Typed`: any value whose type is in a set.
//! - `OptCons`: either `(head . tail)` or `tail` alone.

use std::fmt;

use crate::config::UncertaintyConfig;
use crate::errors::{invalid_any_of, EvalResult};
use crate::heap::Heap;
use crate::identity::DedupSet;
use crate::range::NumInRange;
use crate::type_set::TypeSet;
use crate::value::{type_names, Value};


#[derive(Clone)]
pub enum Unknown {
    Fully,
    AnyOf(AnyOf),
    NumInRange(Heap<NumInRange>),
    Typed(TypeSet),
    OptCons(Heap<OptCons>),
}

impl Unknown {
    /// The value this unknown must be, when its set has a single member.
    pub fn singleton(&self) -> Option<&Value> {
        match self {
            Unknown::NumInRange(r) => r.singleton(),
            _ => None,
        }
    }

    /// Alternatives of a disjunctive unknown: `AnyOf` candidates, or the two
    /// shapes of an `OptCons`.
    pub fn alternatives(&self) -> Option<Vec<Value>> {
        match self {
            Unknown::AnyOf(any) => Some(any.candidates().to_vec()),
            Unknown::OptCons(o) => Some(o.alternatives().to_vec()),
            _ => None,
        }
    }
}

/// Candidate set of at least two distinct values, none of them `AnyOf` or
/// fully unknown.
#[derive(Clone)]
pub struct AnyOf(Heap<Vec<Value>>);

impl AnyOf {
    pub(crate) fn new_unchecked(candidates: Vec<Value>) -> Self {
        AnyOf(Heap::new(candidates))
    }

    #[inline]
    pub fn candidates(&self) -> &[Value] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is exactly `{#t, #f}`.
    pub fn is_maybe(&self) -> bool {
        self.len() == 2
            && self.0.contains(&Value::Bool(true))
            && self.0.contains(&Value::Bool(false))
    }
}

/// Build an `any-of` under the active [`UncertaintyConfig`].
pub fn any_of(values: impl IntoIterator<Item = Value>) -> EvalResult {
    any_of_with_limit(values, UncertaintyConfig::current().max_any_of)
}

/// Build an `any-of`, normalizing as it goes:
///
/// - nested `any-of` inputs are flattened into their candidates,
/// - repeated candidates are dropped,
/// - a fully unknown input (or more than `limit` candidates) widens the
///   result to fully unknown,
/// - a single remaining candidate is returned as itself.
pub fn any_of_with_limit(values: impl IntoIterator<Item = Value>, limit: usize) -> EvalResult {
    let mut set = DedupSet::new();
    let mut pending: Vec<Value> = values.into_iter().collect();
    pending.reverse();

    while let Some(value) = pending.pop() {
        match value {
            Value::Unknown(Unknown::Fully) => return Ok(Value::unknown()),
            Value::Unknown(Unknown::AnyOf(nested)) => {
                pending.extend(nested.candidates().iter().rev().cloned());
            }
            other => {
                set.insert(other);
                if set.len() > limit {
                    tracing::trace!(limit, "any-of widened to fully unknown");
                    return Ok(Value::unknown());
                }
            }
        }
    }

    let mut candidates = set.into_vec();
    match candidates.len() {
        0 => Err(invalid_any_of()),
        1 => Ok(candidates.swap_remove(0)),
        _ => Ok(Value::any_of_raw(candidates)),
    }
}

/// Optional cons: the value is either `(head . tail)` or just `tail`.
pub struct OptCons {
    head: Value,
    tail: Value,
}

impl OptCons {
    pub(crate) fn new(head: Value, tail: Value) -> Self {
        OptCons { head, tail }
    }

    #[inline]
    pub fn head(&self) -> &Value {
        &self.head
    }

    #[inline]
    pub fn tail(&self) -> &Value {
        &self.tail
    }

    pub fn alternatives(&self) -> [Value; 2] {
        [
            Value::cons(self.head.clone(), self.tail.clone()),
            self.tail.clone(),
        ]
    }
}

/// Types a value might have, or `None` when it could be anything.
pub fn possible_types(value: &Value) -> Option<TypeSet> {
    match value {
        Value::Unknown(Unknown::Fully) => None,
        Value::Unknown(Unknown::AnyOf(any)) => {
            let mut acc = TypeSet::new(std::iter::empty::<&str>());
            for candidate in any.candidates() {
                acc = acc.union(&possible_types(candidate)?);
            }
            Some(acc)
        }
        Value::Unknown(Unknown::NumInRange(r)) => Some(r.possible_types()),
        Value::Unknown(Unknown::Typed(types)) => Some(types.clone()),
        Value::Unknown(Unknown::OptCons(o)) => {
            Some(TypeSet::single(type_names::CONS).union(&possible_types(o.tail())?))
        }
        concrete => Some(TypeSet::single(concrete.type_name())),
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unknown::Fully => f.write_str("#unknown"),
            Unknown::AnyOf(any) => {
                f.write_str("#any-of(")?;
                for (i, c) in any.candidates().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            }
            Unknown::NumInRange(r) => write!(f, "{r}"),
            Unknown::Typed(types) => write!(f, "#typed-unknown({types})"),
            Unknown::OptCons(o) => write!(f, "#opt-cons({} . {})", o.head, o.tail),
        }
    }
}

impl fmt::Debug for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
