//! Playlist tree model and navigation.

pub mod model;
pub mod navigator;
pub mod outline;
pub mod selector;

pub use model::{NodeLabel, PlaylistNode, PlaylistTree};
pub use navigator::{ResolvedLeaf, resolve};
pub use outline::{EpisodeOutline, SeasonOutline, outline};
pub use selector::{DEFAULT_LANGUAGE, Selector, StreamQuery, Target};
