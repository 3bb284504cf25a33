//! Reelpath Core - Stream resolution for catalog ids
//!
//! Navigates the player's playlist tree down to a single stream leaf,
//! discovers the player's current domain from its landing page, and
//! orchestrates both behind the media info and link resolver seams.

pub mod config;
pub mod discovery;
pub mod errors;
pub mod playlist;
pub mod providers;
pub mod resolver;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{ReelpathConfig, ServerConfig, UpstreamConfig};
pub use discovery::DomainDiscovery;
pub use errors::{ConfigError, DiscoveryError, NavigationError, ResolveError, UpstreamError};
pub use playlist::{PlaylistNode, PlaylistTree, ResolvedLeaf, Selector, StreamQuery};
pub use providers::{
    Envelope, MediaInfoProvider, StreamLink, StreamLinkResolver, StreamRequest,
};
pub use resolver::{ResolvedStream, StreamResolver, StreamResponse};

/// Convenience type alias for Results with ResolveError.
pub type Result<T> = std::result::Result<T, ResolveError>;
