//! Player domain location: fetch the landing page, then discover.

use reelpath_core::{DiscoveryError, DomainDiscovery, UpstreamConfig, UpstreamError};
use tracing::{debug, warn};

use crate::client::transport_error;

/// Finds the current player domain on every call.
///
/// Nothing is cached between calls; a failed fetch falls back to the
/// configured static domain.
#[derive(Debug, Clone)]
pub struct DomainLocator {
    client: reqwest::Client,
    entry_url: Option<String>,
    discovery: DomainDiscovery,
}

impl DomainLocator {
    pub fn new(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            entry_url: config.entry_url.clone(),
            discovery: DomainDiscovery::new(config.fallback_domain.clone()),
        }
    }

    /// Locates the player domain, without a trailing slash.
    ///
    /// # Errors
    /// - `DiscoveryError::DomainNotFound` - Page lookup failed and no fallback is configured
    pub async fn locate(&self) -> Result<String, DiscoveryError> {
        let Some(entry_url) = self.entry_url.as_deref() else {
            warn!("No entry URL configured, using fallback player domain");
            return self.discovery.fallback_domain();
        };

        match self.fetch_page(entry_url).await {
            Ok(html) => self.discovery.discover(&html),
            Err(error) => {
                warn!(%error, "Failed to fetch entry page, using fallback player domain");
                self.discovery.fallback_domain()
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, UpstreamError> {
        debug!(url, "Fetching entry page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Network {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        response.text().await.map_err(|e| transport_error(url, e))
    }
}
