use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_core::{builtin_groups, FailurePolicy, Group, Manifest, DEFAULT_OWNER};
use serde::{Deserialize, Serialize};

use crate::sources::{ConfiguredSource, FsSource, HttpSource};

const APP_NAME: &str = "template-catalog";
const CONFIG_FILE: &str = "config.json";

const ENV_ROOT: &str = "TEMPLATE_CATALOG_ROOT";
const ENV_URL: &str = "TEMPLATE_CATALOG_URL";
const ENV_DEFAULT_OWNER: &str = "TEMPLATE_CATALOG_DEFAULT_OWNER";

/// Where template content is read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Fs { root: PathBuf },
    Http { base_url: String },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Fs {
            root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Owner assumed for manifest rows that do not name one, and the owner
    /// shown when a query does not pick one.
    #[serde(default = "default_owner")]
    pub default_owner: String,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Replaces the built-in manifest when present.
    #[serde(default)]
    pub groups: Option<Vec<Group>>,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_owner: default_owner(),
            source: SourceConfig::default(),
            failure_policy: FailurePolicy::default(),
            groups: None,
        }
    }
}

impl AppConfig {
    /// Load configuration, then apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, the file in the user's config
    /// directory is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match get_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                Ok(_) => Self::default(),
                Err(e) => {
                    tracing::debug!("No config directory, using defaults: {}", e);
                    Self::default()
                }
            },
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    /// A URL override wins over a root override.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(root) = non_empty(ENV_ROOT) {
            self.source = SourceConfig::Fs { root: root.into() };
        }
        if let Some(base_url) = non_empty(ENV_URL) {
            self.source = SourceConfig::Http { base_url };
        }
        if let Some(owner) = non_empty(ENV_DEFAULT_OWNER) {
            self.default_owner = owner;
        }
        self
    }

    pub fn manifest(&self) -> Result<Manifest> {
        let groups = self.groups.clone().unwrap_or_else(builtin_groups);
        Manifest::new(groups, self.default_owner.clone()).context("Invalid template manifest")
    }

    pub fn content_source(&self) -> Result<ConfiguredSource> {
        let source: ConfiguredSource = match &self.source {
            SourceConfig::Fs { root } => FsSource::new(root)?.into(),
            SourceConfig::Http { base_url } => HttpSource::new(base_url)?.into(),
        };
        Ok(source)
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_owner, "sameer");
    }

    #[test]
    fn test_parses_http_source_and_policy() {
        let config = AppConfig::from_json(
            r#"{
                "default_owner": "alice",
                "source": { "kind": "http", "base_url": "http://localhost:8080" },
                "failure_policy": "placeholder"
            }"#,
        )
        .unwrap();

        assert_eq!(config.default_owner, "alice");
        assert_eq!(
            config.source,
            SourceConfig::Http {
                base_url: "http://localhost:8080".to_string()
            }
        );
        assert_eq!(config.failure_policy, FailurePolicy::Placeholder);
    }

    #[test]
    fn test_parses_custom_groups() {
        let config = AppConfig::from_json(
            r#"{
                "groups": [{
                    "key": "promo",
                    "category": "promo",
                    "path": "promo",
                    "naming": { "extension": ".html", "style": "title" },
                    "files": ["bigBanner.html", { "name": "strip.html", "owner": "bob" }]
                }]
            }"#,
        )
        .unwrap();

        let manifest = config.manifest().unwrap();
        let rows = manifest.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].owner, "sameer");
        assert_eq!(rows[1].owner, "bob");
        assert_eq!(rows[0].content_path, "promo/bigBanner.html");
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default().with_env_overrides(env(&[
            (ENV_ROOT, "/srv/templates"),
            (ENV_DEFAULT_OWNER, "utk"),
        ]));
        assert_eq!(
            config.source,
            SourceConfig::Fs {
                root: PathBuf::from("/srv/templates")
            }
        );
        assert_eq!(config.default_owner, "utk");
    }

    #[test]
    fn test_url_override_wins_and_blank_values_ignored() {
        let config = AppConfig::default().with_env_overrides(env(&[
            (ENV_ROOT, "/srv/templates"),
            (ENV_URL, "http://example.test/templates"),
            (ENV_DEFAULT_OWNER, "  "),
        ]));
        assert_eq!(
            config.source,
            SourceConfig::Http {
                base_url: "http://example.test/templates".to_string()
            }
        );
        assert_eq!(config.default_owner, "sameer");
    }

    #[test]
    fn test_builtin_manifest_is_valid() {
        let manifest = AppConfig::default().manifest().unwrap();
        assert_eq!(manifest, Manifest::builtin());
        assert_eq!(manifest.len(), 25);
    }

    #[test]
    fn test_empty_default_owner_is_rejected() {
        let config = AppConfig {
            default_owner: String::new(),
            ..AppConfig::default()
        };
        assert!(config.manifest().is_err());
    }
}
