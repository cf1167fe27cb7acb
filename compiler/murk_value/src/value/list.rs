//! Cons cells and list-spine iteration.

use std::mem;

use smallvec::SmallVec;

use super::Value;
use crate::heap::Heap;

/// A pair. Lists are chains of cells ending in nil.
pub struct Cons {
    head: Value,
    tail: Value,
}

impl Cons {
    pub(crate) fn new(head: Value, tail: Value) -> Self {
        Cons { head, tail }
    }

    #[inline]
    pub fn head(&self) -> &Value {
        &self.head
    }

    #[inline]
    pub fn tail(&self) -> &Value {
        &self.tail
    }
}

// Unlink nested cells through a worklist so dropping a long or deeply nested
// list doesn't recurse once per cell.
impl Drop for Cons {
    fn drop(&mut self) {
        if !matches!(self.head, Value::Cons(_)) && !matches!(self.tail, Value::Cons(_)) {
            return;
        }
        let mut pending: SmallVec<[Value; 4]> = SmallVec::new();
        pending.push(mem::replace(&mut self.head, Value::Nil));
        pending.push(mem::replace(&mut self.tail, Value::Nil));
        while let Some(value) = pending.pop() {
            if let Value::Cons(cell) = value {
                if let Ok(mut owned) = Heap::try_unwrap(cell) {
                    pending.push(mem::replace(&mut owned.head, Value::Nil));
                    pending.push(mem::replace(&mut owned.tail, Value::Nil));
                }
            }
        }
    }
}

/// Iterator over the heads of a list spine.
pub struct ListIter<'a> {
    current: &'a Value,
}

impl<'a> ListIter<'a> {
    pub(super) fn new(start: &'a Value) -> Self {
        ListIter { current: start }
    }

    /// The part of the spine not yet consumed. Once iteration finishes this
    /// is the terminating value: nil for proper lists.
    pub fn rest(&self) -> &'a Value {
        self.current
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        match self.current {
            Value::Cons(cell) => {
                let cell: &'a Cons = cell;
                self.current = &cell.tail;
                Some(&cell.head)
            }
            _ => None,
        }
    }
}
