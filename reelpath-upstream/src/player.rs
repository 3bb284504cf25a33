//! Player API client implementing both upstream seams.
//!
//! The play page embeds a small config object (`let pc = {...};`) whose
//! `file` path and `key` unlock the playlist; the same key then unlocks
//! individual stream links.

use async_trait::async_trait;
use regex::Regex;
use reelpath_core::{
    Envelope, MediaInfoProvider, PlaylistNode, PlaylistTree, StreamLink, StreamLinkResolver,
    StreamRequest, UpstreamConfig, UpstreamError,
};
use reqwest::header::REFERER;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::client::{build_client, join_url, transport_error};
use crate::locator::DomainLocator;

/// Header carrying the session key on player API calls.
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Inline config object of a play page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerConfig {
    /// Player-relative path of the playlist endpoint
    pub file: String,
    /// Session key for this title
    pub key: String,
}

/// Extracts the `let pc = {...};` config object from a play page.
pub fn extract_player_config(html: &str) -> Option<PlayerConfig> {
    let pattern = Regex::new(r"(?s)let\s+pc\s*=\s*(\{.*?\})\s*;").ok()?;
    let object = pattern.captures(html)?.get(1)?.as_str();
    serde_json::from_str(object).ok()
}

/// HTTP client for the player front-end.
#[derive(Debug, Clone)]
pub struct PlayerApi {
    client: reqwest::Client,
    locator: DomainLocator,
}

impl PlayerApi {
    /// Creates a player client from upstream configuration.
    ///
    /// # Errors
    /// - `UpstreamError::Network` - HTTP client could not be built
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = build_client(config)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a player client sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            locator: DomainLocator::new(client.clone(), config),
            client,
        }
    }

    pub fn locator(&self) -> &DomainLocator {
        &self.locator
    }
}

#[async_trait]
impl MediaInfoProvider for PlayerApi {
    async fn media_info(&self, catalog_id: &str) -> Result<Envelope<PlaylistTree>, UpstreamError> {
        let domain = self.locator.locate().await?;
        let play_url = format!("{domain}/play/{}", urlencoding::encode(catalog_id));

        debug!(url = %play_url, "Fetching play page");
        let response = self
            .client
            .get(&play_url)
            .header(REFERER, format!("{domain}/"))
            .send()
            .await
            .map_err(|e| transport_error(&play_url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %play_url, %status, "Play page request rejected");
            return Ok(Envelope::failure(format!("Play page returned HTTP {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| transport_error(&play_url, e))?;
        let Some(config) = extract_player_config(&html) else {
            warn!(url = %play_url, "Play page has no player config");
            return Ok(Envelope::failure("Player configuration not found"));
        };

        let playlist_url = join_url(&domain, &config.file);
        debug!(url = %playlist_url, "Fetching playlist");
        let response = self
            .client
            .post(&playlist_url)
            .header(CSRF_HEADER, &config.key)
            .header(REFERER, &play_url)
            .send()
            .await
            .map_err(|e| transport_error(&playlist_url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %playlist_url, %status, "Playlist request rejected");
            return Ok(Envelope::failure(format!("Playlist returned HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&playlist_url, e))?;
        let playlist: Vec<PlaylistNode> =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Parse {
                reason: format!("Invalid playlist for {catalog_id}: {e}"),
            })?;

        Ok(Envelope::ok(PlaylistTree::new(playlist, config.key)))
    }
}

#[async_trait]
impl StreamLinkResolver for PlayerApi {
    async fn stream_link(
        &self,
        request: &StreamRequest,
    ) -> Result<Envelope<StreamLink>, UpstreamError> {
        let domain = self.locator.locate().await?;
        let token = request.file.trim_start_matches(['~', '/']);
        let url = format!("{domain}/playlist/{token}.txt");

        debug!(url = %url, "Requesting stream link");
        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, &request.key)
            .header(REFERER, format!("{domain}/"))
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, %status, "Stream link request rejected");
            return Ok(Envelope::failure(format!("Stream link returned HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| transport_error(&url, e))?;
        let link = body.trim();
        if link.is_empty() {
            return Ok(Envelope::failure("Empty stream link response"));
        }

        Ok(Envelope::ok(StreamLink::new(link)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_player_config() {
        let html = r#"<script>
            let pc = {"file":"/list/abc123","key":"k1","href":"https://x"};
        </script>"#;

        assert_eq!(
            extract_player_config(html),
            Some(PlayerConfig {
                file: "/list/abc123".to_string(),
                key: "k1".to_string(),
            })
        );
    }

    #[test]
    fn test_config_spanning_lines() {
        let html = "let pc = {\n  \"file\": \"/list/x\",\n  \"key\": \"k\"\n};";
        assert_eq!(extract_player_config(html).map(|pc| pc.key), Some("k".to_string()));
    }

    #[test]
    fn test_missing_or_broken_config() {
        assert_eq!(extract_player_config("<html></html>"), None);
        assert_eq!(extract_player_config("let pc = {file: '/x'};"), None);
    }
}
