//! Translation sources: where namespace documents actually come from.
//!
//! Two sources exist. [`LocalSource`] serves the files checked into the
//! repository, reading them from disk on the server and fetching them from
//! the site origin in client bundles. [`RemoteSource`] pulls the published
//! documents from the blob store so copy changes go live without a deploy.
//!
//! Sources report failures through [`SourceError`]; deciding what a failure
//! means for the page is the loader's job, not theirs.

use crate::config::{Config, ExecutionContext, LOCALE};
use crate::namespace::Namespace;
use crate::resource::TranslationResource;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Why a source failed to produce a resource.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("invalid translation document from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unreadable translation file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The failure taxonomy as a plain value, carried in load provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Request never produced a response (DNS, refused connection, timeout)
    Transport,
    /// Response arrived with a non-success status
    Status(u16),
    /// Payload was not a valid translation document
    Parse,
    /// Local file missing or unreadable
    Unreadable,
}

impl SourceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SourceError::Transport { .. } => FailureKind::Transport,
            SourceError::Status { status, .. } => FailureKind::Status(*status),
            SourceError::Parse { .. } => FailureKind::Parse,
            SourceError::Unreadable { .. } => FailureKind::Unreadable,
        }
    }
}

/// Loads namespace documents from the application's own files.
#[derive(Debug, Clone)]
pub struct LocalSource {
    context: ExecutionContext,
    app_root: PathBuf,
    site_base_url: String,
    client: reqwest::Client,
}

impl LocalSource {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            context: config.execution_context,
            app_root: config.app_root.clone(),
            site_base_url: config.site_base_url.clone(),
            client,
        }
    }

    pub async fn load(&self, namespace: Namespace) -> Result<TranslationResource, SourceError> {
        match self.context {
            ExecutionContext::Server => self.load_from_disk(namespace).await,
            ExecutionContext::Client => self.load_from_site(namespace).await,
        }
    }

    /// Path of a namespace document under the application root.
    pub fn file_path(&self, namespace: Namespace) -> PathBuf {
        self.app_root
            .join("public")
            .join("locales")
            .join(LOCALE)
            .join(format!("{}.json", namespace.as_str()))
    }

    async fn load_from_disk(
        &self,
        namespace: Namespace,
    ) -> Result<TranslationResource, SourceError> {
        let path = self.file_path(namespace);
        debug!("Reading namespace '{}' from {}", namespace, path.display());

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| SourceError::Unreadable {
                path: path.display().to_string(),
                source: e,
            })?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Parse {
            origin: path.display().to_string(),
            source: e,
        })
    }

    async fn load_from_site(
        &self,
        namespace: Namespace,
    ) -> Result<TranslationResource, SourceError> {
        let url = format!(
            "{}/locales/{}/{}.json",
            self.site_base_url,
            LOCALE,
            namespace.as_str()
        );
        debug!("Fetching namespace '{}' from site origin: {}", namespace, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport {
                url: url.clone(),
                source: e,
            })?;
        decode_response(&url, response).await
    }
}

/// Fetches namespace documents from the published blob store.
///
/// One plain GET per document, no retries: a slow retry loop would hold up
/// server-side rendering, and the loader already has a local fallback.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            base_url: config.remote_base_url.clone(),
            client,
        }
    }

    /// URL of a namespace document in the blob store.
    pub fn document_url(&self, namespace: Namespace) -> String {
        format!("{}/{}/{}.json", self.base_url, LOCALE, namespace.as_str())
    }

    pub async fn load(&self, namespace: Namespace) -> Result<TranslationResource, SourceError> {
        let url = self.document_url(namespace);
        debug!("Fetching namespace '{}' from remote store: {}", namespace, url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            // Always revalidate so freshly published copy shows up
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| SourceError::Transport {
                url: url.clone(),
                source: e,
            })?;
        decode_response(&url, response).await
    }
}

/// Turn an HTTP response into a resource, mapping each failure to its kind.
async fn decode_response(
    url: &str,
    response: reqwest::Response,
) -> Result<TranslationResource, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // Read the body as text first so a decode failure is distinguishable
    // from a connection dying mid-body.
    let body = response.text().await.map_err(|e| SourceError::Transport {
        url: url.to_string(),
        source: e,
    })?;
    serde_json::from_str(&body).map_err(|e| SourceError::Parse {
        origin: url.to_string(),
        source: e,
    })
}
