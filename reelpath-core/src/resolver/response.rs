//! Caller-facing response shape for stream resolution.

use serde::{Deserialize, Serialize};

use crate::errors::{NavigationError, ResolveError};
use crate::playlist::ResolvedLeaf;

/// Successful resolution: the playable link and the leaf it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStream {
    pub link: String,
    pub leaf: ResolvedLeaf,
}

/// Payload of a successful [`StreamResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamData {
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    pub language: String,
    pub available_languages: Vec<String>,
}

/// Uniform `{success, ...}` response for every resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StreamData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_seasons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<String>>,
}

impl From<ResolvedStream> for StreamResponse {
    fn from(stream: ResolvedStream) -> Self {
        let leaf = stream.leaf;
        Self {
            success: true,
            data: Some(StreamData {
                link: stream.link,
                season: leaf.season,
                episode: leaf.episode,
                language: leaf.language,
                available_languages: leaf.available_languages,
            }),
            message: None,
            error: None,
            available_seasons: None,
            available_languages: None,
        }
    }
}

impl From<&ResolveError> for StreamResponse {
    fn from(error: &ResolveError) -> Self {
        let (available_seasons, available_languages) = match error {
            ResolveError::Navigation(NavigationError::SeasonNotFound {
                available_seasons, ..
            }) => (Some(available_seasons.clone()), None),
            ResolveError::Navigation(NavigationError::LanguageNotFound {
                available_languages,
                ..
            }) => (None, Some(available_languages.clone())),
            _ => (None, None),
        };

        Self {
            success: false,
            data: None,
            message: Some(error.to_string()),
            error: error.detail(),
            available_seasons,
            available_languages,
        }
    }
}

impl From<Result<ResolvedStream, ResolveError>> for StreamResponse {
    fn from(outcome: Result<ResolvedStream, ResolveError>) -> Self {
        match outcome {
            Ok(stream) => stream.into(),
            Err(error) => (&error).into(),
        }
    }
}
