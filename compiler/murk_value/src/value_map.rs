//! Hashed map keyed by values.
//!
//! Keys are matched by exact identity. [`ValueMap::get_possible`] also
//! answers lookups with uncertain keys, returning every entry whose key the
//! lookup key might equal.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::errors::EvalError;
use crate::identity::{content_hash, same_value};
use crate::logic::intersects;
use crate::value::Value;

pub struct ValueMap<V> {
    buckets: FxHashMap<u64, SmallVec<[(Value, V); 1]>>,
    len: usize,
}

impl<V> Default for ValueMap<V> {
    fn default() -> Self {
        ValueMap {
            buckets: FxHashMap::default(),
            len: 0,
        }
    }
}

impl<V> ValueMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert, returning the previous value stored under an identical key.
    pub fn insert(&mut self, key: Value, value: V) -> Option<V> {
        let bucket = self.buckets.entry(content_hash(&key)).or_default();
        if let Some(slot) = bucket.iter_mut().find(|(k, _)| same_value(k, &key)) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        bucket.push((key, value));
        self.len += 1;
        None
    }

    pub fn get(&self, key: &Value) -> Option<&V> {
        self.buckets
            .get(&content_hash(key))?
            .iter()
            .find(|(k, _)| same_value(k, key))
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &Value) -> Option<V> {
        let hash = content_hash(key);
        let bucket = self.buckets.get_mut(&hash)?;
        let index = bucket.iter().position(|(k, _)| same_value(k, key))?;
        let (_, value) = bucket.remove(index);
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        self.len -= 1;
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &V)> {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    /// Every entry whose key might equal `key`.
    ///
    /// A non-numeric atom key with an exact match returns just that entry;
    /// otherwise every key is tested with [`intersects`], so `1` also finds
    /// an entry stored under `1.0`.
    pub fn get_possible(&self, key: &Value) -> Result<Vec<&V>, EvalError> {
        if key.is_atom() && key.as_numeric().is_none() {
            if let Some(v) = self.get(key) {
                return Ok(vec![v]);
            }
        }
        let mut out = Vec::new();
        for (k, v) in self.iter() {
            if intersects(k, key)? {
                out.push(v);
            }
        }
        Ok(out)
    }
}
