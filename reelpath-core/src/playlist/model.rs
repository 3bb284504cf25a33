//! Playlist tree types and their mapping from the loose upstream JSON.

use serde::{Deserialize, Deserializer, Serialize};

/// Labels shared by every playlist node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeLabel {
    /// Display label ("Season 1", "English", ...)
    pub title: String,
    /// Stable identifier, stringified when upstream sends a number
    pub id: String,
    /// Episode label on episode containers
    pub episode: Option<String>,
}

/// One node of the playlist tree.
///
/// Upstream sends duck-typed objects; the presence of `file` or `folder`
/// decides the variant when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum PlaylistNode {
    /// Resolvable stream reference (a language variant).
    Leaf {
        /// Node labels
        label: NodeLabel,
        /// Opaque stream-file token
        file: String,
    },
    /// Season or episode holding ordered children.
    Container {
        /// Node labels
        label: NodeLabel,
        /// Children in upstream order
        children: Vec<PlaylistNode>,
    },
    /// Node with neither `file` nor `folder`; never matches a lookup.
    Malformed {
        /// Node labels
        label: NodeLabel,
    },
}

impl PlaylistNode {
    /// Creates a leaf node.
    pub fn leaf(title: impl Into<String>, file: impl Into<String>) -> Self {
        PlaylistNode::Leaf {
            label: NodeLabel {
                title: title.into(),
                ..NodeLabel::default()
            },
            file: file.into(),
        }
    }

    /// Creates a container node.
    pub fn container(
        title: impl Into<String>,
        id: impl Into<String>,
        children: Vec<PlaylistNode>,
    ) -> Self {
        PlaylistNode::Container {
            label: NodeLabel {
                title: title.into(),
                id: id.into(),
                episode: None,
            },
            children,
        }
    }

    /// Sets the episode label, keeping the variant.
    pub fn with_episode(mut self, episode: impl Into<String>) -> Self {
        self.label_mut().episode = Some(episode.into());
        self
    }

    /// Sets the id, keeping the variant.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.label_mut().id = id.into();
        self
    }

    pub fn label(&self) -> &NodeLabel {
        match self {
            PlaylistNode::Leaf { label, .. }
            | PlaylistNode::Container { label, .. }
            | PlaylistNode::Malformed { label } => label,
        }
    }

    fn label_mut(&mut self) -> &mut NodeLabel {
        match self {
            PlaylistNode::Leaf { label, .. }
            | PlaylistNode::Container { label, .. }
            | PlaylistNode::Malformed { label } => label,
        }
    }

    pub fn title(&self) -> &str {
        &self.label().title
    }

    pub fn id(&self) -> &str {
        &self.label().id
    }

    pub fn episode(&self) -> Option<&str> {
        self.label().episode.as_deref()
    }

    /// Children of a container, `None` for leaves and malformed nodes.
    pub fn children(&self) -> Option<&[PlaylistNode]> {
        match self {
            PlaylistNode::Container { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Stream token of a leaf, `None` otherwise.
    pub fn file(&self) -> Option<&str> {
        match self {
            PlaylistNode::Leaf { file, .. } => Some(file),
            _ => None,
        }
    }
}

/// Playlist returned by the media info provider together with its session key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaylistTree {
    /// Seasons for series, language leaves for movies
    #[serde(default)]
    pub playlist: Vec<PlaylistNode>,
    /// Session key forwarded untouched to the link resolver
    #[serde(default)]
    pub key: String,
}

impl PlaylistTree {
    pub fn new(playlist: Vec<PlaylistNode>, key: impl Into<String>) -> Self {
        Self {
            playlist,
            key: key.into(),
        }
    }
}

/// Wire shape of a node as the player API sends it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct RawNode {
    #[serde(default, deserialize_with = "loose_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    id: Option<String>,
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    episode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    folder: Option<Vec<RawNode>>,
}

impl From<RawNode> for PlaylistNode {
    fn from(raw: RawNode) -> Self {
        let label = NodeLabel {
            title: raw.title.unwrap_or_default(),
            id: raw.id.unwrap_or_default(),
            episode: raw.episode,
        };

        match (raw.file, raw.folder) {
            (Some(file), _) if !file.is_empty() => PlaylistNode::Leaf { label, file },
            (_, Some(folder)) => PlaylistNode::Container {
                label,
                children: folder.into_iter().map(PlaylistNode::from).collect(),
            },
            _ => PlaylistNode::Malformed { label },
        }
    }
}

impl From<PlaylistNode> for RawNode {
    fn from(node: PlaylistNode) -> Self {
        let (label, file, folder) = match node {
            PlaylistNode::Leaf { label, file } => (label, Some(file), None),
            PlaylistNode::Container { label, children } => (
                label,
                None,
                Some(children.into_iter().map(RawNode::from).collect()),
            ),
            PlaylistNode::Malformed { label } => (label, None, None),
        };

        RawNode {
            title: Some(label.title),
            id: Some(label.id),
            episode: label.episode,
            file,
            folder,
        }
    }
}

/// Accepts a string, a number or null where upstream is inconsistent.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|value| match value {
        Loose::Text(text) => text,
        Loose::Number(number) => number.to_string(),
        Loose::Flag(flag) => flag.to_string(),
    }))
}
