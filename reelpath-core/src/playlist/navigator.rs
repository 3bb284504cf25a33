//! Playlist traversal from selectors to a single stream leaf.
//!
//! Each tree level has its own lookup so a miss can report the siblings
//! available at exactly that level. Lookups are first-match in playlist order.

use serde::Serialize;
use tracing::debug;

use super::model::{PlaylistNode, PlaylistTree};
use super::selector::{Selector, Target};
use crate::errors::NavigationError;

/// Leaf located by [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLeaf {
    /// Opaque stream-file token of the leaf
    pub file: String,
    /// Title of the matched language leaf
    pub language: String,
    /// Title of the matched season (series only)
    pub season: Option<String>,
    /// Title of the matched episode (series only)
    pub episode: Option<String>,
    /// Titles of the leaf and its siblings; movie mode keeps untitled entries
    pub available_languages: Vec<String>,
}

/// Locates the stream leaf matching `selector` in `tree`.
///
/// # Errors
/// - `NavigationError::SeasonNotFound` - No season container matched
/// - `NavigationError::EpisodeNotFound` - No episode container matched
/// - `NavigationError::LanguageNotFound` - No leaf matched the language
pub fn resolve(tree: &PlaylistTree, selector: &Selector) -> Result<ResolvedLeaf, NavigationError> {
    match &selector.target {
        Target::Episode { season, episode } => {
            resolve_episode(&tree.playlist, season, episode, &selector.language)
        }
        Target::Movie => resolve_movie(&tree.playlist, &selector.language),
    }
}

fn resolve_movie(nodes: &[PlaylistNode], language: &str) -> Result<ResolvedLeaf, NavigationError> {
    let (title, file) = find_language(nodes, language)?;
    debug!(language = title, "Resolved movie stream");

    Ok(ResolvedLeaf {
        file: file.to_string(),
        language: title.to_string(),
        season: None,
        episode: None,
        available_languages: nodes.iter().map(|node| node.title().to_string()).collect(),
    })
}

fn resolve_episode(
    nodes: &[PlaylistNode],
    season: &str,
    episode: &str,
    language: &str,
) -> Result<ResolvedLeaf, NavigationError> {
    let season_title = format!("Season {season}");
    let season_node = nodes
        .iter()
        .find(|node| node.title() == season_title || node.id() == season);

    let Some((season_node, episodes)) =
        season_node.and_then(|node| node.children().map(|children| (node, children)))
    else {
        return Err(NavigationError::SeasonNotFound {
            season: season.to_string(),
            available_seasons: nodes.iter().map(|node| node.title().to_string()).collect(),
        });
    };

    let episode_id = format!("{season}-{episode}");
    let episode_node = episodes
        .iter()
        .find(|node| node.episode() == Some(episode) || node.id() == episode_id);

    let Some((episode_node, languages)) =
        episode_node.and_then(|node| node.children().map(|children| (node, children)))
    else {
        return Err(NavigationError::EpisodeNotFound {
            season: season.to_string(),
            episode: episode.to_string(),
        });
    };

    let (title, file) = find_language(languages, language)?;
    debug!(
        season = season_node.title(),
        episode = episode_node.title(),
        language = title,
        "Resolved episode stream"
    );

    Ok(ResolvedLeaf {
        file: file.to_string(),
        language: title.to_string(),
        season: Some(season_node.title().to_string()),
        episode: Some(episode_node.title().to_string()),
        available_languages: available_languages(languages),
    })
}

/// First node whose title case-folds to `language`; it must be a leaf.
fn find_language<'a>(
    nodes: &'a [PlaylistNode],
    language: &str,
) -> Result<(&'a str, &'a str), NavigationError> {
    let wanted = language.to_lowercase();
    let matched = nodes
        .iter()
        .find(|node| !node.title().is_empty() && node.title().to_lowercase() == wanted);

    match matched.and_then(|node| node.file().map(|file| (node.title(), file))) {
        Some(found) => Ok(found),
        None => Err(NavigationError::LanguageNotFound {
            language: language.to_string(),
            available_languages: available_languages(nodes),
        }),
    }
}

fn available_languages(nodes: &[PlaylistNode]) -> Vec<String> {
    nodes
        .iter()
        .map(PlaylistNode::title)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect()
}
