//! Reelpath Upstream - HTTP clients for the player front-end
//!
//! Locates the player's current domain from its landing page and talks to
//! the player API to fetch playlists and stream links.

pub mod client;
pub mod locator;
pub mod player;

// Re-export main types
pub use client::build_client;
pub use locator::DomainLocator;
pub use player::{PlayerApi, PlayerConfig, extract_player_config};
