//! Manifest fetching.
//!
//! One manifest, one fetch. There is no polling, caching, revalidation, or
//! retry: a failed fetch is terminal for that load and the user sees a
//! generic message while the underlying error goes to the log.
//!
//! Sources are behind [`ManifestSource`] so the view can be driven by an
//! HTTP agent in production and by an in-memory source in tests.

use crate::config::FetchConfig;
use crate::types::Manifest;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use ureq::Agent;

/// Shown for any fetch failure; details are logged, not displayed.
pub const FETCH_FAILED_MESSAGE: &str = "Unable to load site content.";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Observable state of the manifest fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Uninitialized,
    /// No manifest URL configured. Permanent; nothing is fetched.
    ConfigurationMissing,
    Loading,
    Loaded(Arc<Manifest>),
    /// User-facing message.
    Failed(String),
}

impl FetchState {
    pub fn manifest(&self) -> Option<&Arc<Manifest>> {
        match self {
            Self::Loaded(manifest) => Some(manifest),
            _ => None,
        }
    }
}

pub trait ManifestSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Manifest, FetchError>;
}

/// HTTP GET via a `ureq` agent. Any status outside 2xx is a failure.
pub struct HttpSource {
    agent: Agent,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(config.timeout_secs.map(Duration::from_secs))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl ManifestSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Manifest, FetchError> {
        let response = self
            .agent
            .get(url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(FetchError::Status(status));
        }
        let mut body_reader = response.into_body();
        let body = body_reader
            .read_to_string()
            .map_err(|e| FetchError::Http(format!("failed to read response: {e}")))?;
        Ok(Manifest::from_json(&body)?)
    }
}

/// Reads a manifest from disk. Accepts plain paths and `file://` URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSource;

impl FileSource {
    fn path_for(url: &str) -> PathBuf {
        PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
    }
}

impl ManifestSource for FileSource {
    fn fetch(&self, url: &str) -> Result<Manifest, FetchError> {
        let content = std::fs::read_to_string(Self::path_for(url))?;
        Ok(Manifest::from_json(&content)?)
    }
}

/// Pick the source for a manifest location.
pub fn source_for(url: &str, config: &FetchConfig) -> Arc<dyn ManifestSource> {
    if is_http(url) {
        Arc::new(HttpSource::new(config))
    } else {
        Arc::new(FileSource)
    }
}

fn is_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Fetch once and map the outcome to a terminal [`FetchState`].
///
/// `url == None` short-circuits to [`FetchState::ConfigurationMissing`]
/// without touching `source`.
pub fn load(url: Option<&str>, source: &dyn ManifestSource) -> FetchState {
    let Some(url) = url else {
        return FetchState::ConfigurationMissing;
    };
    info!(url, "Fetching manifest");
    match source.fetch(url) {
        Ok(manifest) => {
            info!(
                id = manifest.id,
                pages = manifest.pages().len(),
                "Manifest loaded"
            );
            FetchState::Loaded(Arc::new(manifest))
        }
        Err(e) => {
            warn!(url, error = %e, "Failed to load manifest");
            FetchState::Failed(FETCH_FAILED_MESSAGE.to_string())
        }
    }
}
