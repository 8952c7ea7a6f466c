//! Read-only views over the cache driven by a free-text query.

use crate::cache::PersonCache;
use crate::model::{Person, eq_ignore_case};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupView {
    query: String,
}

impl LookupView {
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Case-insensitive substring match on names, in cache order. Recomputed
    /// on every call; an empty query matches everyone.
    pub fn matches<'a>(&self, cache: &'a PersonCache) -> Vec<&'a Person> {
        let needle = self.query.to_lowercase();
        cache
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Lookup behind the manual search button, using the stored query.
    pub fn search<'a>(&self, cache: &'a PersonCache) -> Option<&'a Person> {
        find_exact(cache, &self.query)
    }
}

/// First person whose name equals `text` ignoring case, or whose number
/// equals `text` exactly.
pub fn find_exact<'a>(cache: &'a PersonCache, text: &str) -> Option<&'a Person> {
    cache
        .iter()
        .find(|p| eq_ignore_case(&p.name, text) || p.number == text)
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
