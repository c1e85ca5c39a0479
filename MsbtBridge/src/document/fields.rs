//! Order-preserving bag of fields the engine does not interpret

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    /// Position of a field held in a typed struct member.
    Typed,
    Opaque(Value),
}

/// Unknown keys of an export record, kept in their original order.
///
/// Typed members of the owning record leave a positional marker in the bag so
/// that serialization reproduces the source key order exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldBag {
    slots: IndexMap<String, Slot>,
}

impl FieldBag {
    /// Create an empty bag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an opaque field, returning the previous opaque value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        match self.slots.insert(key.into(), Slot::Opaque(value)) {
            Some(Slot::Opaque(old)) => Some(old),
            _ => None,
        }
    }

    /// Get an opaque field by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.slots.get(key) {
            Some(Slot::Opaque(value)) => Some(value),
            _ => None,
        }
    }

    /// Iterate opaque fields in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots.iter().filter_map(|(key, slot)| match slot {
            Slot::Opaque(value) => Some((key.as_str(), value)),
            Slot::Typed => None,
        })
    }

    /// Iterate opaque values mutably in source order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.slots.values_mut().filter_map(|slot| match slot {
            Slot::Opaque(value) => Some(value),
            Slot::Typed => None,
        })
    }

    /// Number of opaque fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the bag holds no opaque fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys (typed markers included) in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub(crate) fn mark_typed(&mut self, key: impl Into<String>) {
        self.slots.insert(key.into(), Slot::Typed);
    }

    /// Write every slot into `map`, asking `typed` for the value of typed keys.
    ///
    /// `typed` returns `Ok(true)` when it emitted an entry for the key. Keys named
    /// in `typed_keys` that never appeared in the bag are appended afterwards.
    pub(crate) fn serialize_into<M, F>(
        &self,
        map: &mut M,
        typed_keys: &[&str],
        mut typed: F,
    ) -> Result<(), M::Error>
    where
        M: SerializeMap,
        F: FnMut(&str, &mut M) -> Result<bool, M::Error>,
    {
        let mut emitted: Vec<&str> = Vec::with_capacity(typed_keys.len());

        for (key, slot) in &self.slots {
            let key = key.as_str();
            if let Some(typed_key) = typed_keys.iter().find(|k| **k == key) {
                // A set typed member wins over a stale opaque value under the same key
                if typed(typed_key, map)? {
                    emitted.push(*typed_key);
                    continue;
                }
            }
            if let Slot::Opaque(value) = slot {
                map.serialize_entry(key, value)?;
            }
        }

        for key in typed_keys {
            if !emitted.contains(key) && !self.slots.contains_key(*key) {
                typed(key, map)?;
            }
        }

        Ok(())
    }
}

impl FromIterator<(String, Value)> for FieldBag {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}
