//! Ordered map type for hashtable values.
//!
//! [`PsMap`] wraps an [`IndexMap`] so entries keep their insertion order. The
//! serializer writes entries in exactly that order and never sorts them, so
//! the order a caller inserts keys in is the order they appear in the literal.
//!
//! ## Examples
//!
//! ```rust
//! use serde_pslit::{PsMap, PsValue};
//!
//! let mut map = PsMap::new();
//! map.insert("name".to_string(), PsValue::from("Alice"));
//! map.insert("enabled".to_string(), PsValue::from(true));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::PsValue;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to literal values.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{PsMap, PsValue};
///
/// let mut map = PsMap::new();
/// map.insert("second".to_string(), PsValue::from(2));
/// map.insert("first".to_string(), PsValue::from(1));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["second", "first"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PsMap(IndexMap<String, PsValue>);

impl PsMap {
    /// Creates an empty `PsMap`.
    #[must_use]
    pub fn new() -> Self {
        PsMap(IndexMap::new())
    }

    /// Creates an empty `PsMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PsMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Replacing an existing key keeps the key's original position and
    /// returns the old value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pslit::{PsMap, PsValue};
    ///
    /// let mut map = PsMap::new();
    /// map.insert("a".to_string(), PsValue::from(1));
    /// map.insert("b".to_string(), PsValue::from(2));
    /// assert!(map.insert("a".to_string(), PsValue::from(3)).is_some());
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec!["a", "b"]);
    /// ```
    pub fn insert(&mut self, key: String, value: PsValue) -> Option<PsValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PsValue> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut PsValue> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, shifting later entries down so the remaining order is kept.
    pub fn remove(&mut self, key: &str) -> Option<PsValue> {
        self.0.shift_remove(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, PsValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, PsValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PsValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, PsValue>> for PsMap {
    fn from(map: HashMap<String, PsValue>) -> Self {
        PsMap(map.into_iter().collect())
    }
}

impl From<PsMap> for HashMap<String, PsValue> {
    fn from(map: PsMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for PsMap {
    type Item = (String, PsValue);
    type IntoIter = indexmap::map::IntoIter<String, PsValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PsMap {
    type Item = (&'a String, &'a PsValue);
    type IntoIter = indexmap::map::Iter<'a, String, PsValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, PsValue)> for PsMap {
    fn from_iter<T: IntoIterator<Item = (String, PsValue)>>(iter: T) -> Self {
        PsMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keeps_order() {
        let mut map: PsMap = ["a", "b", "c"]
            .iter()
            .map(|k| (k.to_string(), PsValue::from(*k)))
            .collect();

        assert_eq!(map.remove("b"), Some(PsValue::from("b")));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_get_mut() {
        let mut map = PsMap::new();
        map.insert("flag".to_string(), PsValue::Bool(false));
        if let Some(value) = map.get_mut("flag") {
            *value = PsValue::Bool(true);
        }
        assert_eq!(map.get("flag"), Some(&PsValue::Bool(true)));
    }
}
