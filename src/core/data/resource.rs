use std::collections::HashSet;

use super::SourceLocation;

/// Placeholder metadata for one interpolated variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    /// Source text of the interpolated expression.
    pub example: String,
}

/// A key/value pair destined for the resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub key: String,
    pub value: String,
    pub placeholders: Vec<Placeholder>,
    pub provenance: SourceLocation,
}

/// Keys and values already present in the project's `*.arb` files.
///
/// Built once before analysis and shared read-only across workers.
#[derive(Debug, Clone, Default)]
pub struct KnownKeys {
    keys: HashSet<String>,
    values: HashSet<String>,
}

impl KnownKeys {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.keys.insert(key.into());
        self.values.insert(value.into());
    }

    pub fn contains(&self, text: &str) -> bool {
        self.keys.contains(text) || self.values.contains(text)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
