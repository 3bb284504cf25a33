//! Shared HTTP client construction and error mapping.

use reelpath_core::{UpstreamConfig, UpstreamError};

/// Builds the HTTP client shared by every upstream call.
///
/// # Errors
/// - `UpstreamError::Network` - TLS backend or client configuration failed
pub fn build_client(config: &UpstreamConfig) -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| UpstreamError::Network {
            url: String::new(),
            reason: format!("Failed to build HTTP client: {e}"),
        })
}

/// Maps a reqwest failure to an upstream error naming the target URL.
pub(crate) fn transport_error(url: &str, error: reqwest::Error) -> UpstreamError {
    let reason = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        "Failed to connect".to_string()
    } else if error.is_body() || error.is_decode() {
        format!("Failed to read response body: {error}")
    } else {
        format!("HTTP request failed: {error}")
    };

    UpstreamError::Network {
        url: url.to_string(),
        reason,
    }
}

/// Joins a player-relative path onto the player domain.
///
/// Absolute URLs are returned unchanged.
pub(crate) fn join_url(domain: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{domain}{path}")
    } else {
        format!("{domain}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://p.example", "/list/abc"),
            "https://p.example/list/abc"
        );
        assert_eq!(
            join_url("https://p.example", "list/abc"),
            "https://p.example/list/abc"
        );
        assert_eq!(
            join_url("https://p.example", "https://other.example/x"),
            "https://other.example/x"
        );
    }

    #[test]
    fn test_build_client_with_defaults() {
        assert!(build_client(&UpstreamConfig::default()).is_ok());
    }
}
