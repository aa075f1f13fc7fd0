//! Version manifest resolution.
//!
//! The manifest service publishes an index of `{id, url}` entries. Each
//! entry's URL serves a per-version manifest whose `downloads.server.url`
//! is the server jar. Both requests are awaited strictly in sequence.

use std::time::Duration;

use mcrd_common::error::{McrdError, Result};
use serde::Deserialize;

/// Raw response from a manifest request.
#[derive(Debug, Clone)]
pub struct Fetched {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

/// Transport used to query the manifest service.
#[allow(async_fn_in_trait)]
pub trait ManifestFetcher {
    /// Performs a GET request against `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure. Non-200 statuses are not errors
    /// at this level.
    async fn fetch(&self, url: &str) -> Result<Fetched>;
}

/// HTTP(S) fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher. Without a timeout a hung upstream blocks forever.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| McrdError::Manifest {
            message: format!("failed to initialise HTTP client: {e}"),
        })?;
        Ok(Self { client })
    }
}

impl ManifestFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched> {
        tracing::debug!(url, "fetching manifest");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| McrdError::Manifest {
                message: format!("failed to fetch {url}: {e}"),
            })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| McrdError::Manifest {
            message: format!("failed to read response body from {url}: {e}"),
        })?;
        Ok(Fetched { status, body })
    }
}

#[derive(Debug, Deserialize)]
struct VersionIndex {
    versions: Vec<VersionEntry>,
}

#[derive(Debug, Deserialize)]
struct VersionEntry {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct VersionManifest {
    downloads: Downloads,
}

#[derive(Debug, Deserialize)]
struct Downloads {
    server: Option<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    url: String,
}

/// Resolves `version` to the download URL of its server artifact.
///
/// # Errors
///
/// Returns `McrdError::InvalidVersion` if the index does not list the
/// version, and `McrdError::Manifest` on transport failures, non-200
/// responses, or unexpected response shapes.
pub async fn resolve_server_url<F: ManifestFetcher>(
    fetcher: &F,
    index_url: &str,
    version: &str,
) -> Result<String> {
    tracing::info!(version, "resolving server download");

    let index = fetcher.fetch(index_url).await?;
    if index.status != 200 {
        return Err(McrdError::Manifest {
            message: format!("unable to acquire version list (HTTP {})", index.status),
        });
    }
    let index: VersionIndex = serde_json::from_str(&index.body)?;

    let entry = index
        .versions
        .into_iter()
        .find(|e| e.id == version)
        .ok_or_else(|| McrdError::InvalidVersion {
            version: version.to_string(),
        })?;

    let manifest = fetcher.fetch(&entry.url).await?;
    if manifest.status != 200 {
        return Err(McrdError::Manifest {
            message: format!(
                "unable to acquire manifest for version {version} (HTTP {})",
                manifest.status
            ),
        });
    }
    let manifest: VersionManifest = serde_json::from_str(&manifest.body)?;

    let server = manifest
        .downloads
        .server
        .ok_or_else(|| McrdError::Manifest {
            message: format!("version {version} has no server download"),
        })?;
    tracing::debug!(url = %server.url, "server download resolved");
    Ok(server.url)
}
