//! Season and episode listing for a series playlist.

use serde::Serialize;

use super::model::{PlaylistNode, PlaylistTree};

/// Season entry of a playlist outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonOutline {
    pub title: String,
    pub id: String,
    pub episodes: Vec<EpisodeOutline>,
}

/// Episode entry of a playlist outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeOutline {
    pub title: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    pub languages: Vec<String>,
}

/// Lists every season container and its episode containers.
///
/// Top-level leaves (movie language variants) and malformed nodes are
/// skipped, so a movie yields an empty outline.
pub fn outline(tree: &PlaylistTree) -> Vec<SeasonOutline> {
    tree.playlist
        .iter()
        .filter_map(|season| {
            let episodes = season.children()?;
            Some(SeasonOutline {
                title: season.title().to_string(),
                id: season.id().to_string(),
                episodes: episodes.iter().filter_map(episode_outline).collect(),
            })
        })
        .collect()
}

fn episode_outline(node: &PlaylistNode) -> Option<EpisodeOutline> {
    let languages = node.children()?;
    Some(EpisodeOutline {
        title: node.title().to_string(),
        id: node.id().to_string(),
        episode: node.episode().map(str::to_string),
        languages: languages
            .iter()
            .filter(|language| language.file().is_some() && !language.title().is_empty())
            .map(|language| language.title().to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_lists_seasons_and_episodes() {
        let tree = PlaylistTree::new(
            vec![
                PlaylistNode::container(
                    "Season 1",
                    "1",
                    vec![
                        PlaylistNode::container(
                            "Episode 1",
                            "1-1",
                            vec![
                                PlaylistNode::leaf("English", "a"),
                                PlaylistNode::leaf("", "b"),
                            ],
                        )
                        .with_episode("1"),
                        PlaylistNode::leaf("Trailer", "t"),
                    ],
                ),
                PlaylistNode::leaf("Bonus", "bonus"),
            ],
            "k",
        );

        let seasons = outline(&tree);

        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[0].title, "Season 1");
        assert_eq!(seasons[0].episodes.len(), 1);
        assert_eq!(seasons[0].episodes[0].episode.as_deref(), Some("1"));
        assert_eq!(seasons[0].episodes[0].languages, vec!["English"]);
    }

    #[test]
    fn test_movie_has_empty_outline() {
        let tree = PlaylistTree::new(vec![PlaylistNode::leaf("English", "a")], "k");
        assert!(outline(&tree).is_empty());
    }
}
