//! Caller-supplied selectors for a stream lookup.

use serde::{Deserialize, Serialize};

/// Language used when the caller does not ask for one.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Raw request parameters as they arrive from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamQuery {
    /// Catalog id (IMDb style)
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub episode: Option<String>,
    /// Preferred language label
    #[serde(default)]
    pub lang: Option<String>,
}

impl StreamQuery {
    /// Query for a movie in the given language.
    pub fn movie(id: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            lang: Some(lang.into()),
            ..Self::default()
        }
    }

    /// Query for an episode in the given language.
    pub fn episode(
        id: impl Into<String>,
        season: impl Into<String>,
        episode: impl Into<String>,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            season: Some(season.into()),
            episode: Some(episode.into()),
            lang: Some(lang.into()),
        }
    }

    /// Catalog id, if one was supplied and is not blank.
    pub fn catalog_id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    pub fn selector(&self) -> Selector {
        Selector::from_parts(
            self.season.as_deref(),
            self.episode.as_deref(),
            self.lang.as_deref(),
        )
    }
}

/// What the navigator should look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Language leaves directly under the root.
    Movie,
    /// Season container, then episode container, then language leaf.
    Episode { season: String, episode: String },
}

/// Normalized lookup request handed to the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub target: Target,
    pub language: String,
}

impl Selector {
    pub fn movie(language: impl Into<String>) -> Self {
        Self {
            target: Target::Movie,
            language: language.into(),
        }
    }

    pub fn episode(
        season: impl Into<String>,
        episode: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            target: Target::Episode {
                season: season.into(),
                episode: episode.into(),
            },
            language: language.into(),
        }
    }

    /// Builds a selector from optional parts.
    ///
    /// Series mode needs both season and episode; a lone season or a lone
    /// episode is looked up as a movie.
    pub fn from_parts(season: Option<&str>, episode: Option<&str>, lang: Option<&str>) -> Self {
        let language = non_empty(lang).unwrap_or(DEFAULT_LANGUAGE);

        match (non_empty(season), non_empty(episode)) {
            (Some(season), Some(episode)) => Self::episode(season, episode, language),
            _ => Self::movie(language),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
