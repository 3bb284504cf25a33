//! In-memory providers for tests and offline development.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Envelope, MediaInfoProvider, StreamLink, StreamLinkResolver, StreamRequest};
use crate::errors::UpstreamError;
use crate::playlist::PlaylistTree;

/// Media info provider serving fixed playlists by catalog id.
#[derive(Debug, Default)]
pub struct StaticMediaInfo {
    entries: HashMap<String, Envelope<PlaylistTree>>,
}

impl StaticMediaInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `tree` for `catalog_id`.
    pub fn with_tree(mut self, catalog_id: impl Into<String>, tree: PlaylistTree) -> Self {
        self.entries.insert(catalog_id.into(), Envelope::ok(tree));
        self
    }

    /// Serves a raw envelope for `catalog_id`.
    pub fn with_envelope(
        mut self,
        catalog_id: impl Into<String>,
        envelope: Envelope<PlaylistTree>,
    ) -> Self {
        self.entries.insert(catalog_id.into(), envelope);
        self
    }
}

#[async_trait]
impl MediaInfoProvider for StaticMediaInfo {
    async fn media_info(&self, catalog_id: &str) -> Result<Envelope<PlaylistTree>, UpstreamError> {
        Ok(self
            .entries
            .get(catalog_id)
            .cloned()
            .unwrap_or_else(|| Envelope::failure(format!("No media found for {catalog_id}"))))
    }
}

/// Link resolver returning a fixed outcome and recording every request.
#[derive(Debug)]
pub struct RecordingLinkResolver {
    outcome: Envelope<StreamLink>,
    calls: Mutex<Vec<StreamRequest>>,
}

impl RecordingLinkResolver {
    /// Resolver answering every request with `link`.
    pub fn returning(link: impl Into<String>) -> Self {
        Self::with_outcome(Envelope::ok(StreamLink::new(link)))
    }

    /// Resolver answering every request with `outcome`.
    pub fn with_outcome(outcome: Envelope<StreamLink>) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> Vec<StreamRequest> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl StreamLinkResolver for RecordingLinkResolver {
    async fn stream_link(
        &self,
        request: &StreamRequest,
    ) -> Result<Envelope<StreamLink>, UpstreamError> {
        self.calls.lock().push(request.clone());
        Ok(self.outcome.clone())
    }
}

/// Upstream that fails every call with the same error.
#[derive(Debug)]
pub struct UnreachableUpstream {
    error: UpstreamError,
}

impl UnreachableUpstream {
    pub fn new(error: UpstreamError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl MediaInfoProvider for UnreachableUpstream {
    async fn media_info(&self, _catalog_id: &str) -> Result<Envelope<PlaylistTree>, UpstreamError> {
        Err(self.error.clone())
    }
}

#[async_trait]
impl StreamLinkResolver for UnreachableUpstream {
    async fn stream_link(
        &self,
        _request: &StreamRequest,
    ) -> Result<Envelope<StreamLink>, UpstreamError> {
        Err(self.error.clone())
    }
}
