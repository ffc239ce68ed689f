use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use catalog_core::{ContentSource, FetchError};

use super::SourceError;

/// Reads templates relative to a root directory.
///
/// Only plain relative paths are accepted; absolute paths and `..` segments are
/// rejected so a manifest cannot reach outside the root.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SourceError::MissingRoot(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path);
        let plain = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if plain {
            Ok(self.root.join(relative))
        } else {
            Err(FetchError::InvalidPath(path.to_string()))
        }
    }
}

impl ContentSource for FsSource {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let full = self.resolve(path)?;
        tracing::trace!(path, file = %full.display(), "Reading template");

        let bytes = tokio::fs::read(&full)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
                _ => FetchError::Io {
                    path: path.to_string(),
                    source,
                },
            })?;
        // Decode like an HTTP body would: invalid UTF-8 is replaced, not rejected.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
