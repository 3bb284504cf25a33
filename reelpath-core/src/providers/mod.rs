//! Collaborator traits for the upstream player services.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::UpstreamError;
use crate::playlist::PlaylistTree;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

/// `{success, data?, message?}` envelope shared by the upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Failed envelope carrying a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Payload of a successful envelope, or the reported message.
    ///
    /// # Errors
    /// Returns the upstream message (if any) when `success` is false or data is absent.
    pub fn into_data(self) -> Result<T, Option<String>> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.message),
        }
    }
}

/// Input of the stream link resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamRequest {
    /// Stream-file token from a playlist leaf
    pub file: String,
    /// Session key from the playlist response
    pub key: String,
}

/// Output of the stream link resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamLink {
    #[serde(default)]
    pub link: Option<String>,
}

impl StreamLink {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
        }
    }
}

/// Looks up the playlist tree and session key for a catalog id.
#[async_trait]
pub trait MediaInfoProvider: Send + Sync + std::fmt::Debug {
    /// Fetches the playlist for `catalog_id`.
    ///
    /// # Errors
    /// - `UpstreamError::Network` - Transport failure
    /// - `UpstreamError::Parse` - Undecodable response
    /// - `UpstreamError::Domain` - Player domain could not be located
    async fn media_info(&self, catalog_id: &str) -> Result<Envelope<PlaylistTree>, UpstreamError>;
}

/// Turns a playlist leaf reference into a playable link.
#[async_trait]
pub trait StreamLinkResolver: Send + Sync + std::fmt::Debug {
    /// Resolves the playable link for `request`.
    ///
    /// # Errors
    /// - `UpstreamError::Network` - Transport failure
    /// - `UpstreamError::Domain` - Player domain could not be located
    async fn stream_link(&self, request: &StreamRequest)
    -> Result<Envelope<StreamLink>, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_envelope_decodes_without_data() {
        let envelope: Envelope<StreamLink> =
            serde_json::from_value(json!({"success": false, "message": "gone"})).unwrap();

        assert_eq!(envelope.into_data(), Err(Some("gone".to_string())));
    }

    #[test]
    fn test_successful_envelope_without_data_is_failure() {
        let envelope: Envelope<StreamLink> =
            serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(envelope.into_data(), Err(None));
    }

    #[test]
    fn test_missing_link_decodes_as_none() {
        let envelope: Envelope<StreamLink> =
            serde_json::from_value(json!({"success": true, "data": {}})).unwrap();
        assert_eq!(envelope.into_data(), Ok(StreamLink { link: None }));
    }
}
