//! Interned symbol names.
//!
//! Symbols compare by integer id. The backing strings are leaked into a
//! process-wide table so `Name::as_str` can hand out `&'static str`.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// An interned symbol.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Name(u32);

struct Interner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

fn interner() -> &'static RwLock<Interner> {
    static INTERNER: OnceLock<RwLock<Interner>> = OnceLock::new();
    INTERNER.get_or_init(|| {
        RwLock::new(Interner {
            map: FxHashMap::default(),
            strings: Vec::new(),
        })
    })
}

/// The symbol table is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InternError {
    pub count: usize,
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "symbol table exceeded capacity: {} symbols, max is {}",
            self.count,
            u32::MAX
        )
    }
}

impl std::error::Error for InternError {}

#[cold]
#[inline(never)]
fn intern_overflow(err: InternError) -> ! {
    panic!("{err}")
}

impl Name {
    /// Intern `text`, returning the existing id if it was seen before.
    ///
    /// # Panics
    /// Panics if the symbol table holds more than `u32::MAX` symbols. Use
    /// [`Name::try_intern`] to handle that case.
    pub fn intern(text: &str) -> Name {
        match Self::try_intern(text) {
            Ok(name) => name,
            Err(err) => intern_overflow(err),
        }
    }

    /// Intern `text`, or report a full symbol table.
    pub fn try_intern(text: &str) -> Result<Name, InternError> {
        if let Some(&id) = interner().read().map.get(text) {
            return Ok(Name(id));
        }

        let mut guard = interner().write();
        // Another thread may have won the race between the read and write lock.
        if let Some(&id) = guard.map.get(text) {
            return Ok(Name(id));
        }
        let count = guard.strings.len();
        let id = u32::try_from(count).map_err(|_| InternError { count })?;
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, id);
        Ok(Name(id))
    }

    /// The symbol's text.
    pub fn as_str(self) -> &'static str {
        interner().read().strings[self.0 as usize]
    }

    /// Whether this symbol's text equals `text` without interning `text`.
    #[inline]
    pub fn is(self, text: &str) -> bool {
        self.as_str() == text
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{InternError, Name};

    #[test]
    fn interning_is_idempotent() {
        let a = Name::intern("car");
        let b = Name::intern("car");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "car");
    }

    #[test]
    fn distinct_text_gets_distinct_ids() {
        assert_ne!(Name::intern("cdr"), Name::intern("cons"));
        assert!(Name::intern("cons").is("cons"));
    }

    #[test]
    fn fallible_interning_agrees_with_intern() {
        assert_eq!(Name::try_intern("list"), Ok(Name::intern("list")));
        let err = InternError { count: usize::MAX };
        assert!(err.to_string().starts_with("symbol table exceeded capacity"));
    }
}
