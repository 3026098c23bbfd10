use crate::{
    foundation::error::{CanopyError, CanopyResult},
    pattern::{builtin, template::Pattern},
};
use std::collections::BTreeMap;

/// Read-only registry of patterns, keyed by name.
///
/// Built once at startup and passed explicitly to block construction and deserialization.
#[derive(Clone, Debug, Default)]
pub struct PatternCatalog {
    patterns: BTreeMap<String, Pattern>,
}

impl PatternCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the builtin patterns.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for pattern in builtin::all() {
            catalog.register(pattern);
        }
        catalog
    }

    /// Add `pattern`, returning the pattern it replaced under the same name.
    pub fn register(&mut self, pattern: Pattern) -> Option<Pattern> {
        let name = pattern.name().to_owned();
        let replaced = self.patterns.insert(name.clone(), pattern);
        if replaced.is_some() {
            tracing::warn!(pattern = %name, "pattern re-registered, replacing previous definition");
        } else {
            tracing::debug!(pattern = %name, "pattern registered");
        }
        replaced
    }

    /// Pattern named `name`.
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.get(name)
    }

    /// Pattern named `name`, or [`CanopyError::UnknownPattern`].
    pub fn require(&self, name: &str) -> CanopyResult<&Pattern> {
        self.get(name)
            .ok_or_else(|| CanopyError::UnknownPattern(name.to_owned()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Registered patterns, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.values()
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/catalog.rs"]
mod tests;
