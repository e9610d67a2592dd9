//! Raw query-string parameters.

use std::collections::HashMap;

/// Multi-valued query parameters reduced to one value per key.
///
/// The first value for a key wins, even when it is empty. An empty value
/// reads as absent, so `sort=&sort=-nome` applies no sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, String>,
    /// Keys in first-seen order, so `filter-` keys are checked deterministically.
    order: Vec<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Builds from decoded `(key, value)` pairs in the order they were sent.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = QueryParams::new();
        for (k, v) in pairs {
            params.insert(k, v);
        }
        params
    }

    /// Records `value` for `key` unless the key was already seen.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.values.contains_key(&key) {
            return;
        }
        self.order.push(key.clone());
        self.values.insert(key, value.into());
    }

    /// Returns the value for `key`, or `None` when absent or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Iterates keys with a non-empty value, in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .map(String::as_str)
            .filter(|k| self.get(k).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.keys().next().is_none()
    }
}
