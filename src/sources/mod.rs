//! Concrete [`ContentSource`] implementations.
//!
//! - [`FsSource`]: reads templates from a directory on disk.
//! - [`HttpSource`]: fetches templates from a static file server.
//! - [`ConfiguredSource`]: whichever of the two the configuration selects.

mod fs;
mod http;

use std::path::PathBuf;

use catalog_core::{ContentSource, FetchError};
use thiserror::Error;

pub use fs::FsSource;
pub use http::HttpSource;

/// Errors constructing a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Template root is not a directory: {0}")]
    MissingRoot(PathBuf),

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Fs(FsSource),
    Http(HttpSource),
}

impl ContentSource for ConfiguredSource {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        match self {
            Self::Fs(source) => source.fetch(path).await,
            Self::Http(source) => source.fetch(path).await,
        }
    }
}

impl From<FsSource> for ConfiguredSource {
    fn from(source: FsSource) -> Self {
        Self::Fs(source)
    }
}

impl From<HttpSource> for ConfiguredSource {
    fn from(source: HttpSource) -> Self {
        Self::Http(source)
    }
}
