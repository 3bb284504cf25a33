//! Stream resolution pipeline.
//!
//! Fetches the playlist, navigates it to a leaf and hands the leaf to the
//! link resolver. Stages run strictly in sequence because each one consumes
//! the previous stage's output.

pub mod response;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::ResolveError;
use crate::playlist::{self, StreamQuery};
use crate::providers::{MediaInfoProvider, StreamLinkResolver, StreamRequest};

pub use response::{ResolvedStream, StreamData, StreamResponse};

/// Orchestrates media info lookup, playlist navigation and link resolution.
#[derive(Debug, Clone)]
pub struct StreamResolver {
    media_info: Arc<dyn MediaInfoProvider>,
    links: Arc<dyn StreamLinkResolver>,
}

impl StreamResolver {
    pub fn new(media_info: Arc<dyn MediaInfoProvider>, links: Arc<dyn StreamLinkResolver>) -> Self {
        Self { media_info, links }
    }

    pub fn media_info(&self) -> &Arc<dyn MediaInfoProvider> {
        &self.media_info
    }

    pub fn links(&self) -> &Arc<dyn StreamLinkResolver> {
        &self.links
    }

    /// Resolves a playable link for `query`.
    ///
    /// # Errors
    /// - `ResolveError::MissingSelector` - No catalog id supplied
    /// - `ResolveError::ProviderFailure` - Media info lookup failed or returned no data
    /// - `ResolveError::Navigation` - Season, episode or language not in the playlist
    /// - `ResolveError::LinkResolutionFailure` - Link resolver failed or returned no link
    /// - `ResolveError::DomainNotFound` - Player domain could not be located
    /// - `ResolveError::Unexpected` - Transport or decoding failure upstream
    pub async fn resolve(&self, query: &StreamQuery) -> Result<ResolvedStream, ResolveError> {
        let catalog_id = query.catalog_id().ok_or(ResolveError::MissingSelector)?;
        let selector = query.selector();

        let tree = self
            .media_info
            .media_info(catalog_id)
            .await?
            .into_data()
            .map_err(|reason| ResolveError::ProviderFailure { reason })?;
        debug!(
            catalog_id,
            nodes = tree.playlist.len(),
            "Fetched playlist"
        );

        let leaf = playlist::resolve(&tree, &selector)?;

        let request = StreamRequest {
            file: leaf.file.clone(),
            key: tree.key,
        };
        let link = self
            .links
            .stream_link(&request)
            .await?
            .into_data()
            .map_err(|reason| ResolveError::LinkResolutionFailure { reason })?
            .link
            .filter(|link| !link.is_empty())
            .ok_or(ResolveError::LinkResolutionFailure { reason: None })?;

        Ok(ResolvedStream { link, leaf })
    }

    /// Resolves `query` into the uniform response shape.
    ///
    /// Never fails: every error is logged and reported in-band.
    pub async fn resolve_response(&self, query: &StreamQuery) -> StreamResponse {
        let outcome = self.resolve(query).await;
        if let Err(error) = &outcome {
            if error.is_selector_error() {
                debug!(?query, error = %error, "Stream not resolvable for selector");
            } else {
                warn!(?query, error = %error, detail = ?error.detail(), "Stream resolution failed");
            }
        }
        outcome.into()
    }
}
