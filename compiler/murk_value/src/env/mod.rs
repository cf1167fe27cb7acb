//! Lexical environments.
//!
//! An [`Environment`] is a shared handle to a scope; scopes link to their
//! parents, and closures keep their defining scope alive. Lookups walk
//! outward until a binding is found.
//!
//! # Purity
//!
//! A scope may be marked pure. Every scope created beneath a pure scope is
//! pure as well, and a mark is never removed, so once code is running in a
//! pure context nothing it creates can escape that context.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::heap::Heap;
use crate::name::Name;
use crate::value::Value;

#[cfg(test)]
mod tests;

/// Whether a binding can be reassigned with `set!`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    Mutable,
    /// Bound by `defconst`.
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Why [`Environment::assign`] failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    Immutable,
    Unbound,
}

#[derive(Clone)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// Scopes start as a short inline list and switch to a hash map once they
/// hold more than this many bindings.
const INLINE_BINDINGS: usize = 8;

enum Bindings {
    Inline(SmallVec<[(Name, Binding); INLINE_BINDINGS]>),
    Map(FxHashMap<Name, Binding>),
}

impl Bindings {
    fn get(&self, name: Name) -> Option<&Binding> {
        match self {
            Bindings::Inline(slots) => slots.iter().find(|(n, _)| *n == name).map(|(_, b)| b),
            Bindings::Map(map) => map.get(&name),
        }
    }

    fn get_mut(&mut self, name: Name) -> Option<&mut Binding> {
        match self {
            Bindings::Inline(slots) => slots
                .iter_mut()
                .find(|(n, _)| *n == name)
                .map(|(_, b)| b),
            Bindings::Map(map) => map.get_mut(&name),
        }
    }

    fn insert(&mut self, name: Name, binding: Binding) {
        if let Some(existing) = self.get_mut(name) {
            *existing = binding;
            return;
        }
        match self {
            Bindings::Inline(slots) if slots.len() < INLINE_BINDINGS => slots.push((name, binding)),
            Bindings::Inline(slots) => {
                let mut map: FxHashMap<Name, Binding> = slots.drain(..).collect();
                map.insert(name, binding);
                *self = Bindings::Map(map);
            }
            Bindings::Map(map) => {
                map.insert(name, binding);
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Bindings::Inline(slots) => slots.len(),
            Bindings::Map(map) => map.len(),
        }
    }
}

struct Scope {
    parent: Option<Environment>,
    pure: AtomicBool,
    bindings: RwLock<Bindings>,
}

/// Shared handle to a scope.
#[derive(Clone)]
pub struct Environment(Heap<Scope>);

impl Environment {
    /// A fresh root scope with no bindings.
    pub fn new() -> Self {
        Self::with_parent(None, false)
    }

    fn with_parent(parent: Option<Environment>, pure: bool) -> Self {
        Environment(Heap::new(Scope {
            parent,
            pure: AtomicBool::new(pure),
            bindings: RwLock::new(Bindings::Inline(SmallVec::new())),
        }))
    }

    /// A new scope nested in this one. It is pure if this scope is.
    #[must_use]
    pub fn child(&self) -> Self {
        Self::with_parent(Some(self.clone()), self.is_pure())
    }

    /// A new pure scope nested in this one.
    #[must_use]
    pub fn pure_child(&self) -> Self {
        Self::with_parent(Some(self.clone()), true)
    }

    pub fn parent(&self) -> Option<&Environment> {
        self.0.parent.as_ref()
    }

    /// The outermost scope.
    #[must_use]
    pub fn root(&self) -> Environment {
        let mut env = self;
        while let Some(parent) = env.parent() {
            env = parent;
        }
        env.clone()
    }

    /// Bind `name` in this scope, replacing any binding it already has here.
    pub fn define(&self, name: Name, value: Value) {
        self.define_with(name, value, Mutability::Mutable);
    }

    pub fn define_with(&self, name: Name, value: Value, mutability: Mutability) {
        self.0.bindings.write().insert(name, Binding { value, mutability });
    }

    /// Like [`define_with`](Self::define_with), but refuses to replace an
    /// immutable binding in this scope.
    pub fn try_define_with(
        &self,
        name: Name,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), AssignError> {
        let mut bindings = self.0.bindings.write();
        if bindings.get(name).is_some_and(|b| !b.mutability.is_mutable()) {
            return Err(AssignError::Immutable);
        }
        bindings.insert(name, Binding { value, mutability });
        Ok(())
    }

    /// Bind `name` in the root scope (global definitions).
    pub fn bind_root(&self, name: Name, value: Value) {
        self.root().define(name, value);
    }

    pub fn bind_root_with(&self, name: Name, value: Value, mutability: Mutability) {
        self.root().define_with(name, value, mutability);
    }

    /// Global definition that leaves constants in place.
    pub fn try_bind_root_with(
        &self,
        name: Name,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), AssignError> {
        self.root().try_define_with(name, value, mutability)
    }

    /// Find the innermost binding of `name`.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let mut env = self;
        loop {
            if let Some(binding) = env.0.bindings.read().get(name) {
                return Some(binding.value.clone());
            }
            env = env.parent()?;
        }
    }

    /// Replace the value of the innermost existing binding of `name`.
    pub fn assign(&self, name: Name, value: Value) -> Result<(), AssignError> {
        let mut env = self;
        loop {
            if let Some(binding) = env.0.bindings.write().get_mut(name) {
                if !binding.mutability.is_mutable() {
                    return Err(AssignError::Immutable);
                }
                binding.value = value;
                return Ok(());
            }
            env = env.parent().ok_or(AssignError::Unbound)?;
        }
    }

    /// Mark this scope pure. Irreversible.
    pub fn mark_pure(&self) {
        self.0.pure.store(true, Ordering::Release);
    }

    /// Whether this scope or any enclosing scope is pure.
    pub fn is_pure(&self) -> bool {
        let mut env = self;
        loop {
            if env.0.pure.load(Ordering::Acquire) {
                return true;
            }
            match env.parent() {
                Some(parent) => env = parent,
                None => return false,
            }
        }
    }

    /// Number of bindings held directly by this scope.
    pub fn local_len(&self) -> usize {
        self.0.bindings.read().len()
    }

    /// Number of scopes from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut env = self;
        while let Some(parent) = env.parent() {
            depth += 1;
            env = parent;
        }
        depth
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Heap::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("bindings", &self.local_len())
            .field("pure", &self.is_pure())
            .finish()
    }
}
