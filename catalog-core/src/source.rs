use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;

/// Script tag injected by the editor's live-preview server into served HTML.
const LIVE_PREVIEW_SCRIPT: &str =
    r#"<script type="text/javascript" src="/___vscode_livepreview_injected_script"></script>"#;

/// Errors returned by a [`ContentSource`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("HTTP error! status: {status} ({path})")]
    Status { path: String, status: u16 },

    #[error("Invalid template path: {0}")]
    InvalidPath(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport failure for {path}: {message}")]
    Transport { path: String, message: String },
}

/// Resolves a manifest-relative path to raw text.
///
/// Paths are logical identifiers such as `"hiroshima/card.html"`; the source owns
/// how they map onto disk, a URL, or memory. Timeouts are the source's concern.
pub trait ContentSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// In-memory source keyed by path. Paths that were never inserted are `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl ContentSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

/// Remove every live-preview script tag, along with the whitespace that follows it.
pub fn strip_injected_script(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find(LIVE_PREVIEW_SCRIPT) {
        out.push_str(&rest[..start]);
        rest = rest[start + LIVE_PREVIEW_SCRIPT.len()..].trim_start();
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_injected_script() {
        let html = format!("<div>a</div>{}\n  <p>b</p>", LIVE_PREVIEW_SCRIPT);
        assert_eq!(strip_injected_script(&html), "<div>a</div><p>b</p>");
    }

    #[test]
    fn test_strip_every_occurrence() {
        let html = format!("{0} x {0}", LIVE_PREVIEW_SCRIPT);
        assert_eq!(strip_injected_script(&html), "x ");
    }

    #[test]
    fn test_untouched_without_script() {
        assert_eq!(strip_injected_script("  plain  "), "  plain  ");
    }
}
