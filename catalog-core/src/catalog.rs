use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::TemplateEntry;

/// An owner + free-text filter over a [`Catalog`].
///
/// A missing `owner` selects the catalog's default owner. A `search` that is
/// blank after trimming applies no text filter at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Query {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, rename = "q")]
    pub search: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// Immutable, ordered snapshot of loaded templates.
///
/// Order is manifest order and is never changed by filtering. Cloning shares the
/// underlying entries, so one catalog can back any number of concurrent readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Arc<[TemplateEntry]>,
    default_owner: Arc<str>,
}

impl Catalog {
    /// Entries with a blank owner are assigned `default_owner`.
    pub fn new(entries: Vec<TemplateEntry>, default_owner: impl Into<String>) -> Self {
        let default_owner: String = default_owner.into();
        let entries: Vec<TemplateEntry> = entries
            .into_iter()
            .map(|mut entry| {
                if entry.owner.trim().is_empty() {
                    entry.owner = default_owner.clone();
                }
                entry
            })
            .collect();

        Self {
            entries: entries.into(),
            default_owner: default_owner.into(),
        }
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_owner(&self) -> &str {
        &self.default_owner
    }

    pub fn get(&self, id: &str) -> Option<&TemplateEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Distinct owners in order of first appearance.
    pub fn owners(&self) -> Vec<&str> {
        let mut owners: Vec<&str> = Vec::new();
        for entry in self.entries.iter() {
            if !owners.contains(&entry.owner.as_str()) {
                owners.push(&entry.owner);
            }
        }
        owners
    }

    pub fn query(&self, query: &Query) -> Vec<&TemplateEntry> {
        let owner = query.owner.as_deref().unwrap_or(&self.default_owner);
        self.filter(owner, query.search.as_deref().unwrap_or(""))
    }

    /// Entries owned by `owner` (exact, case-sensitive) whose name, category or
    /// content contains `search`, ignoring case.
    pub fn filter(&self, owner: &str, search: &str) -> Vec<&TemplateEntry> {
        let needle = (!search.trim().is_empty()).then(|| search.to_lowercase());

        self.entries
            .iter()
            .filter(|entry| entry.owner == owner)
            .filter(|entry| match needle.as_deref() {
                Some(needle) => entry.matches(needle),
                None => true,
            })
            .collect()
    }
}
