//! JSON API server for Reelpath
//!
//! Wires the player client into the stream resolver and serves it as JSON.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use reelpath_core::{ReelpathConfig, StreamResolver};
use reelpath_upstream::PlayerApi;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{api_m3u8, api_media_info, api_season_list, api_stream};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Resolution pipeline shared by all routes
    pub resolver: StreamResolver,
}

impl AppState {
    /// Creates state around an existing resolver.
    pub fn new(resolver: StreamResolver) -> Self {
        Self { resolver }
    }

    /// State backed by the live player API.
    ///
    /// # Errors
    /// - `UpstreamError::Network` - HTTP client could not be built
    pub fn from_config(config: &ReelpathConfig) -> Result<Self, reelpath_core::UpstreamError> {
        let player = Arc::new(PlayerApi::new(&config.upstream)?);
        Ok(Self::new(StreamResolver::new(player.clone(), player)))
    }
}

/// Builds the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/getM3u8", get(api_m3u8))
        .route("/mediaInfo", get(api_media_info))
        .route("/getStream", post(api_stream))
        .route("/getSeasonList", get(api_season_list))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the API server until the process is stopped.
///
/// # Errors
/// - `UpstreamError::Network` - HTTP client could not be built
/// - `std::io::Error` - Listener could not be bound
pub async fn run_server(
    config: ReelpathConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;

    info!(
        address = %listener.local_addr()?,
        entry_url = ?config.upstream.entry_url,
        fallback = ?config.upstream.fallback_domain,
        "Reelpath API listening"
    );

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
