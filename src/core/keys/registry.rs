use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::{
    core::data::{LiteralOccurrence, Placeholder, ResourceEntry, SourceLocation},
    utils::placeholder_name,
};

use super::derive_key;

/// Key chosen for one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResolution {
    pub key: String,
    /// True when the key already existed for identical content, either in
    /// the resource file or earlier in this batch.
    pub reused: bool,
}

/// Allocates resource keys for a batch of occurrences.
///
/// Seeded from the persisted resource file. Must be driven in a stable
/// order (files sorted by path, occurrences by offset) for keys to be
/// deterministic.
#[derive(Debug)]
pub struct KeyRegistry {
    max_key_length: usize,
    by_content: HashMap<String, String>,
    taken: HashSet<String>,
    new_entries: BTreeMap<String, ResourceEntry>,
}

impl KeyRegistry {
    pub fn new(existing: &[(String, String)], max_key_length: usize) -> Self {
        let mut by_content = HashMap::new();
        let mut taken = HashSet::new();
        for (key, value) in existing {
            taken.insert(key.clone());
            by_content
                .entry(value.clone())
                .or_insert_with(|| key.clone());
        }

        Self {
            max_key_length,
            by_content,
            taken,
            new_entries: BTreeMap::new(),
        }
    }

    pub fn resolve(
        &mut self,
        occurrence: &LiteralOccurrence,
        provenance: SourceLocation,
    ) -> KeyResolution {
        if let Some(key) = self.by_content.get(&occurrence.content) {
            return KeyResolution {
                key: key.clone(),
                reused: true,
            };
        }

        let base = derive_key(&occurrence.content, self.max_key_length);
        let key = self.disambiguate(base);
        debug!("new key `{}` for {:?}", key, occurrence.content);

        let placeholders = occurrence
            .variables
            .iter()
            .enumerate()
            .map(|(i, source)| Placeholder {
                name: placeholder_name(i),
                example: source.clone(),
            })
            .collect();

        self.taken.insert(key.clone());
        self.by_content
            .insert(occurrence.content.clone(), key.clone());
        self.new_entries.insert(
            key.clone(),
            ResourceEntry {
                key: key.clone(),
                value: occurrence.content.clone(),
                placeholders,
                provenance,
            },
        );

        KeyResolution { key, reused: false }
    }

    /// Append `2`, `3`, ... to a taken key, shortening the base so the
    /// result still fits `max_key_length`.
    fn disambiguate(&self, base: String) -> String {
        if !self.taken.contains(&base) {
            return base;
        }
        (2usize..)
            .map(|n| {
                let suffix = n.to_string();
                let keep = self
                    .max_key_length
                    .saturating_sub(suffix.len())
                    .clamp(1, base.len());
                format!("{}{}", base.get(..keep).unwrap_or(&base), suffix)
            })
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or(base)
    }

    pub fn has_new_entries(&self) -> bool {
        !self.new_entries.is_empty()
    }

    /// Entries minted in this batch, sorted by key.
    pub fn new_entries(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.new_entries.values()
    }

    pub fn into_new_entries(self) -> Vec<ResourceEntry> {
        self.new_entries.into_values().collect()
    }
}
