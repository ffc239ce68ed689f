use catalog_core::{ContentSource, FetchError};
use reqwest::{Client, StatusCode, Url};

use super::SourceError;

/// Fetches templates from `{base_url}/{path}`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = Client::builder().build()?;
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, SourceError> {
        let parsed =
            Url::parse(base_url.trim_end_matches('/')).map_err(|e| SourceError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `path` to the base URL one percent-encoded segment at a time.
    ///
    /// Segments must be plain names: empty, `.` and `..` segments are refused, and
    /// characters such as `#` or `?` stay part of the filename.
    fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        let invalid = || FetchError::InvalidPath(path.to_string());
        let plain = !path.is_empty()
            && path
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        if !plain {
            return Err(invalid());
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }
}

impl ContentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path)?;
        tracing::trace!(path, %url, "Fetching template");

        let transport = |e: reqwest::Error| FetchError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        match response.status() {
            status if status.is_success() => response.text().await.map_err(transport),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(path.to_string())),
            status => Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}
