//! Release archive download.
//!
//! Builds the deterministic download URL for a resolved asset and retrieves
//! the archive over HTTPS. The full body lands in a uniquely named temporary
//! file so concurrent invocations on the same host cannot clobber each
//! other's in-flight download; the file is removed on drop.

use relay_core::{Error, Result};
use reqwest::Client;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::debug;

/// Fixed latest-release endpoint for engine assets.
pub const RELEASE_ENDPOINT: &str =
    "https://github.com/relay-dev/relay/releases/latest/download";

/// Identifying client token sent with every download request.
const USER_AGENT: &str = concat!("relay-launcher/", env!("CARGO_PKG_VERSION"));

/// Downloads release archives from the fixed latest-release endpoint.
pub struct ReleaseFetcher {
    client: Client,
    endpoint: String,
}

impl Default for ReleaseFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseFetcher {
    /// Create a fetcher against the fixed release endpoint.
    ///
    /// # Panics
    ///
    /// Uses `expect` internally because `reqwest::Client::builder().build()`
    /// only fails with an invalid TLS configuration, which cannot happen with
    /// default settings and a user agent.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_endpoint(RELEASE_ENDPOINT)
    }

    /// Create a fetcher against an alternate endpoint. Test seam only; the
    /// CLI always uses [`RELEASE_ENDPOINT`].
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("failed to create HTTP client - TLS backend initialization failed"),
            endpoint: endpoint.into(),
        }
    }

    /// The deterministic URL for an asset's gzip tar archive.
    #[must_use]
    pub fn asset_url(&self, asset: &str) -> String {
        format!("{}/{}.tar.gz", self.endpoint, asset)
    }

    /// Download an asset's archive to a collision-free temporary file.
    ///
    /// Redirects are followed; any transport failure or non-success status
    /// is terminal and carries the attempted URL. There is no retry and no
    /// fallback to a cached copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Download`] on transport or HTTP failure, or
    /// [`Error::Io`] if the body cannot be written to the temporary file.
    pub async fn download(&self, asset: &str) -> Result<NamedTempFile> {
        let url = self.asset_url(asset);
        debug!(%url, "Downloading release archive");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::download(&url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download(&url, format!("HTTP {}", response.status())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::download(&url, e.to_string()))?;

        let mut archive = tempfile::Builder::new()
            .prefix("relay-")
            .suffix(".tar.gz")
            .tempfile()
            .map_err(|e| Error::io(e, None, "create download scratch file"))?;
        archive
            .write_all(&body)
            .map_err(|e| Error::io(e, Some(archive.path().to_path_buf()), "write download"))?;

        debug!(bytes = body.len(), path = %archive.path().display(), "Archive downloaded");
        Ok(archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_url_composition() {
        let fetcher = ReleaseFetcher::new();
        assert_eq!(
            fetcher.asset_url("relay-linux-amd64"),
            "https://github.com/relay-dev/relay/releases/latest/download/relay-linux-amd64.tar.gz"
        );
    }

    #[test]
    fn test_asset_url_uses_custom_endpoint() {
        let fetcher = ReleaseFetcher::with_endpoint("http://127.0.0.1:9/dl");
        assert_eq!(
            fetcher.asset_url("relay-darwin-arm64"),
            "http://127.0.0.1:9/dl/relay-darwin-arm64.tar.gz"
        );
    }

    #[tokio::test]
    async fn test_download_failure_names_url() {
        // Nothing listens on the discard port; the transport error must be
        // terminal and carry the attempted URL.
        let fetcher = ReleaseFetcher::with_endpoint("http://127.0.0.1:9/dl");
        let err = fetcher.download("relay-linux-amd64").await.unwrap_err();
        match err {
            relay_core::Error::Download { url, .. } => {
                assert_eq!(url, "http://127.0.0.1:9/dl/relay-linux-amd64.tar.gz");
            }
            other => panic!("expected Download error, got {other:?}"),
        }
    }
}
