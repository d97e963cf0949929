//! Ordered map type for TOON objects.
//!
//! [`ToonMap`] wraps [`IndexMap`] to keep object fields in insertion order,
//! which spec-level correctness depends on: TABULAR field order and
//! round-trip fidelity both assume the order a value tree was built in is
//! the order it prints in.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{ToonMap, ToonValue};
//!
//! let mut map = ToonMap::new();
//! map.insert("name".to_string(), ToonValue::from("Alice"));
//! map.insert("age".to_string(), ToonValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to TOON values.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{ToonMap, ToonValue};
///
/// let mut map = ToonMap::new();
/// map.insert("first".to_string(), ToonValue::from(1));
/// map.insert("second".to_string(), ToonValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ToonMap(IndexMap<String, crate::ToonValue>);

impl ToonMap {
    #[must_use]
    pub fn new() -> Self {
        ToonMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ToonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the prior value if the key
    /// already existed. Re-inserting an existing key does not move it —
    /// insertion order is preserved for existing keys, matching
    /// `IndexMap::insert`'s semantics.
    pub fn insert(&mut self, key: String, value: crate::ToonValue) -> Option<crate::ToonValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::ToonValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::ToonValue> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::ToonValue> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::ToonValue> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::ToonValue> {
        self.0.iter()
    }
}

impl Default for ToonMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<String, crate::ToonValue>> for ToonMap {
    fn from(map: HashMap<String, crate::ToonValue>) -> Self {
        ToonMap(map.into_iter().collect())
    }
}

impl From<ToonMap> for HashMap<String, crate::ToonValue> {
    fn from(map: ToonMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for ToonMap {
    type Item = (String, crate::ToonValue);
    type IntoIter = indexmap::map::IntoIter<String, crate::ToonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, crate::ToonValue)> for ToonMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::ToonValue)>>(iter: T) -> Self {
        ToonMap(IndexMap::from_iter(iter))
    }
}
