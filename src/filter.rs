//! Query filters for list endpoints.

use std::collections::HashMap;

use crate::endpoint::QueryValues;

/// Filter used to narrow list requests, e.g. `search` or `limit`.
///
/// Any key can be stored. When a request is built the filter is resolved
/// against the set of fields the endpoint accepts; other keys are dropped.
///
/// ```
/// use taxis99::Filter;
///
/// let filter = Filter::new().with("search", "ana").with("limit", "10");
/// let query = filter.resolve(&["search"]);
/// assert_eq!(query.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter(HashMap<String, String>);

impl Filter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`Filter::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Remove `key`, returning its value if it was set.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Current value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the entries whose key is in `allowed`.
    pub fn resolve(&self, allowed: &[&str]) -> QueryValues {
        self.0
            .iter()
            .filter(|(key, _)| allowed.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Resolve an optional filter. No filter means no query parameters.
pub fn resolve_filter(filter: Option<&Filter>, allowed: &[&str]) -> QueryValues {
    filter.map(|f| f.resolve(allowed)).unwrap_or_default()
}

impl<K, V> FromIterator<(K, V)> for Filter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
