//! Error types for stream resolution.
//!
//! Each concern gets its own enum so callers can match on the level that
//! failed. [`ResolveError`] is the orchestrator-facing union that is turned
//! into the uniform `{success: false, ...}` response shape.

use thiserror::Error;

/// Domain discovery exhausted every strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// No strategy matched and no fallback domain is configured.
    #[error("Could not find player domain")]
    DomainNotFound,
}

/// Playlist traversal miss at one of the three tree levels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// No top-level container matched the season selector.
    #[error("Season {season} not found. Available seasons: {}", available_seasons.join(", "))]
    SeasonNotFound {
        /// Season selector as supplied by the caller
        season: String,
        /// Title of every top-level node, in playlist order
        available_seasons: Vec<String>,
    },

    /// No episode container matched inside the season.
    #[error("Episode {episode} not found in Season {season}")]
    EpisodeNotFound {
        /// Season selector as supplied by the caller
        season: String,
        /// Episode selector as supplied by the caller
        episode: String,
    },

    /// No leaf matched the requested language.
    #[error("Stream not available in {language}. Available languages: {}", available_languages.join(", "))]
    LanguageNotFound {
        /// Requested language, unfolded
        language: String,
        /// Non-empty sibling titles at the level that failed
        available_languages: Vec<String>,
    },
}

/// Failures talking to the player front-end.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Request could not be sent or the body could not be read.
    #[error("Network error for {url}: {reason}")]
    Network {
        /// Target URL
        url: String,
        /// Transport failure description
        reason: String,
    },

    /// Upstream answered with a body we could not decode.
    #[error("Parse error: {reason}")]
    Parse {
        /// Decode failure description
        reason: String,
    },

    /// The player domain could not be located.
    #[error(transparent)]
    Domain(#[from] DiscoveryError),
}

/// Every way a stream resolution can fail.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// No catalog id in the request.
    #[error("Please provide a valid IMDB id")]
    MissingSelector,

    /// Media info lookup reported failure or returned no data.
    #[error("Failed to fetch media info")]
    ProviderFailure {
        /// Message reported by the provider, if any
        reason: Option<String>,
    },

    /// Playlist traversal miss.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// Link resolver reported failure or returned no link.
    #[error("Failed to fetch stream URL")]
    LinkResolutionFailure {
        /// Message reported by the resolver, if any
        reason: Option<String>,
    },

    /// Player domain discovery exhausted every strategy.
    #[error("Could not find player domain")]
    DomainNotFound,

    /// Anything else, reported with its cause.
    #[error("Internal server error")]
    Unexpected {
        /// Description of the underlying failure
        reason: String,
    },
}

impl ResolveError {
    /// Secondary detail reported next to the message as `error`.
    pub fn detail(&self) -> Option<String> {
        match self {
            ResolveError::ProviderFailure { reason } => reason.clone(),
            ResolveError::LinkResolutionFailure { reason } => Some(
                reason
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
            ResolveError::Unexpected { reason } => Some(reason.clone()),
            _ => None,
        }
    }

    /// Checks if the caller can fix this failure by changing the request.
    pub fn is_selector_error(&self) -> bool {
        matches!(
            self,
            ResolveError::MissingSelector | ResolveError::Navigation(_)
        )
    }
}

impl From<UpstreamError> for ResolveError {
    fn from(error: UpstreamError) -> Self {
        match error {
            UpstreamError::Domain(DiscoveryError::DomainNotFound) => ResolveError::DomainNotFound,
            other => ResolveError::Unexpected {
                reason: other.to_string(),
            },
        }
    }
}

impl From<DiscoveryError> for ResolveError {
    fn from(error: DiscoveryError) -> Self {
        match error {
            DiscoveryError::DomainNotFound => ResolveError::DomainNotFound,
        }
    }
}

/// Configuration values that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable held an unusable value.
    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}
