use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::manifest::Manifest;
use crate::source::{strip_injected_script, ContentSource, FetchError};

/// Receives per-row fetch failures. Diagnostics only; never blocks the load.
pub trait ErrorSink {
    fn report(&self, path: &str, error: &FetchError);
}

/// Reports failures through `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, path: &str, error: &FetchError) {
        tracing::warn!(path, error = %error, "Failed to load template");
    }
}

/// What happens to a row whose content could not be fetched.
///
/// - `Skip`: the row is left out of the catalog.
/// - `Placeholder`: the row is kept with an error message as its content.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    Skip,
    Placeholder,
}

/// Per-load bookkeeping, by content path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_empty: Vec<String>,
    pub failed: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub report: LoadReport,
}

/// Builds a [`Catalog`] from a [`Manifest`], one row at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Loader {
    policy: FailurePolicy,
}

impl Loader {
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Fetch every manifest row in order and assemble the catalog.
    ///
    /// Rows are fetched sequentially so a failure is always attributable to a
    /// single path. A failed row is reported to `sink` and handled per the
    /// [`FailurePolicy`]; it never aborts the remaining rows. Rows whose content
    /// is empty are left out.
    pub async fn load<S, E>(&self, manifest: &Manifest, source: &S, sink: &E) -> LoadOutcome
    where
        S: ContentSource,
        E: ErrorSink + ?Sized,
    {
        let rows = manifest.rows();
        let mut entries = Vec::with_capacity(rows.len());
        let mut report = LoadReport::default();

        for row in rows {
            let content = match source.fetch(&row.content_path).await {
                Ok(raw) => strip_injected_script(&raw),
                Err(error) => {
                    sink.report(&row.content_path, &error);
                    report.failed.push(row.content_path.clone());
                    match self.policy {
                        FailurePolicy::Skip => continue,
                        FailurePolicy::Placeholder => format!(
                            "Error loading template: {} - {}",
                            row.content_path, error
                        ),
                    }
                }
            };

            if content.is_empty() {
                tracing::debug!(path = %row.content_path, "Skipping empty template");
                report.skipped_empty.push(row.content_path);
                continue;
            }

            entries.push(row.into_entry(content));
        }

        report.loaded = entries.len();
        tracing::info!(
            loaded = report.loaded,
            failed = report.failed.len(),
            empty = report.skipped_empty.len(),
            "Template catalog loaded"
        );

        LoadOutcome {
            catalog: Catalog::new(entries, manifest.default_owner()),
            report,
        }
    }
}

/// Load with the default policy, reporting failures through `tracing`.
pub async fn load_catalog<S>(manifest: &Manifest, source: &S) -> Catalog
where
    S: ContentSource,
{
    Loader::default()
        .load(manifest, source, &TracingSink)
        .await
        .catalog
}
