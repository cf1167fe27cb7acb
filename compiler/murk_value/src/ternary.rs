//! Three-valued logic.

use std::fmt;

/// A truth value that may be undetermined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ternary {
    True,
    False,
    Maybe,
}

impl Ternary {
    #[inline]
    pub fn from_bool(b: bool) -> Self {
        if b {
            Ternary::True
        } else {
            Ternary::False
        }
    }

    /// Kleene conjunction: false dominates, then maybe.
    #[must_use]
    pub fn and(self, other: Ternary) -> Ternary {
        match (self, other) {
            (Ternary::False, _) | (_, Ternary::False) => Ternary::False,
            (Ternary::True, Ternary::True) => Ternary::True,
            _ => Ternary::Maybe,
        }
    }

    /// Kleene disjunction: true dominates, then maybe.
    #[must_use]
    pub fn or(self, other: Ternary) -> Ternary {
        match (self, other) {
            (Ternary::True, _) | (_, Ternary::True) => Ternary::True,
            (Ternary::False, Ternary::False) => Ternary::False,
            _ => Ternary::Maybe,
        }
    }

    #[must_use]
    pub fn not(self) -> Ternary {
        match self {
            Ternary::True => Ternary::False,
            Ternary::False => Ternary::True,
            Ternary::Maybe => Ternary::Maybe,
        }
    }

    #[must_use]
    pub fn xor(self, other: Ternary) -> Ternary {
        match (self.to_bool(), other.to_bool()) {
            (Some(a), Some(b)) => Ternary::from_bool(a != b),
            _ => Ternary::Maybe,
        }
    }

    /// Combine the outcomes of several alternatives: a definite answer only
    /// when every alternative agrees.
    #[must_use]
    pub fn agree(self, other: Ternary) -> Ternary {
        if self == other {
            self
        } else {
            Ternary::Maybe
        }
    }

    pub fn to_bool(self) -> Option<bool> {
        match self {
            Ternary::True => Some(true),
            Ternary::False => Some(false),
            Ternary::Maybe => None,
        }
    }

    #[inline]
    pub fn is_true(self) -> bool {
        self == Ternary::True
    }

    #[inline]
    pub fn is_false(self) -> bool {
        self == Ternary::False
    }

    #[inline]
    pub fn is_maybe(self) -> bool {
        self == Ternary::Maybe
    }
}

impl From<bool> for Ternary {
    fn from(b: bool) -> Self {
        Ternary::from_bool(b)
    }
}

impl fmt::Display for Ternary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ternary::True => "true",
            Ternary::False => "false",
            Ternary::Maybe => "maybe",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Ternary::{self, False, Maybe, True};

    const ALL: [Ternary; 3] = [True, False, Maybe];

    #[test]
    fn and_table() {
        assert_eq!(True.and(True), True);
        assert_eq!(True.and(Maybe), Maybe);
        assert_eq!(Maybe.and(Maybe), Maybe);
        for t in ALL {
            assert_eq!(False.and(t), False);
            assert_eq!(t.and(False), False);
        }
    }

    #[test]
    fn or_table() {
        assert_eq!(False.or(False), False);
        assert_eq!(False.or(Maybe), Maybe);
        assert_eq!(Maybe.or(Maybe), Maybe);
        for t in ALL {
            assert_eq!(True.or(t), True);
            assert_eq!(t.or(True), True);
        }
    }

    #[test]
    fn de_morgan_holds() {
        for a in ALL {
            for b in ALL {
                assert_eq!(a.and(b).not(), a.not().or(b.not()));
                assert_eq!(a.or(b).not(), a.not().and(b.not()));
            }
        }
    }

    #[test]
    fn xor_is_undetermined_with_maybe() {
        assert_eq!(True.xor(False), True);
        assert_eq!(True.xor(True), False);
        assert_eq!(Maybe.xor(False), Maybe);
    }

    #[test]
    fn agree_requires_unanimity() {
        assert_eq!(True.agree(True), True);
        assert_eq!(True.agree(False), Maybe);
        assert_eq!(False.agree(Maybe), Maybe);
    }
}
