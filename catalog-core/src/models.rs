use serde::{Deserialize, Serialize};

/// A single loaded template.
///
/// Entries are created by the [`Loader`](crate::Loader) and never change afterwards.
/// The `id` is derived from the group key and the filename, so it is stable across
/// loads of the same manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateEntry {
    pub id: String,
    /// Display name produced by the group's naming rule.
    pub name: String,
    /// Group label, or `"other"` for root-level files.
    pub category: String,
    /// Raw fetched text with editor-injected markup removed.
    pub content: String,
    pub owner: String,
}

impl TemplateEntry {
    /// Case-insensitive substring match across name, category and content.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}
