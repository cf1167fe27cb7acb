//! Sets of type names.

use std::fmt;

use crate::heap::Heap;
use crate::name::Name;
use crate::value::type_names;

/// A set of type names, kept sorted by text and free of duplicates.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeSet(Heap<Vec<Name>>);

impl TypeSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_names(names.into_iter().map(|s| Name::intern(s.as_ref())).collect())
    }

    fn from_names(mut names: Vec<Name>) -> Self {
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names.dedup();
        TypeSet(Heap::new(names))
    }

    pub fn single(name: &str) -> Self {
        TypeSet(Heap::new(vec![Name::intern(name)]))
    }

    /// Every numeric type.
    pub fn numeric() -> Self {
        Self::new(type_names::NUMERIC.iter().copied())
    }

    /// Exact integer types.
    pub fn integer() -> Self {
        Self::new(type_names::INTEGER.iter().copied())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Name> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n.is(name))
    }

    pub fn is_subset(&self, other: &TypeSet) -> bool {
        self.0.iter().all(|n| other.0.contains(n))
    }

    pub fn intersects(&self, other: &TypeSet) -> bool {
        self.0.iter().any(|n| other.0.contains(n))
    }

    /// Whether a value of one set could equal a value of the other.
    ///
    /// Numbers are equal across representations (`1` and `1.0`), so any two
    /// sets holding a numeric type overlap whatever the representation.
    pub fn may_share_values(&self, other: &TypeSet) -> bool {
        self.intersects(other) || (self.has_numeric() && other.has_numeric())
    }

    fn has_numeric(&self) -> bool {
        type_names::NUMERIC.iter().any(|name| self.contains(name))
    }

    #[must_use]
    pub fn intersection(&self, other: &TypeSet) -> TypeSet {
        TypeSet(Heap::new(
            self.0.iter().copied().filter(|n| other.0.contains(n)).collect(),
        ))
    }

    #[must_use]
    pub fn union(&self, other: &TypeSet) -> TypeSet {
        Self::from_names(self.0.iter().chain(other.0.iter()).copied().collect())
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeSet({self})")
    }
}
