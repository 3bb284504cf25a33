//! API handlers for stream resolution and playlist inspection
//!
//! Every handler answers 200 with a `{success, ...}` body; failures are
//! reported in-band.

use axum::extract::{Query, State};
use axum::response::Json;
use reelpath_core::playlist::{SeasonOutline, outline};
use reelpath_core::{
    Envelope, PlaylistTree, ResolveError, StreamLink, StreamQuery, StreamRequest, StreamResponse,
};
use serde::Deserialize;
use tracing::warn;

use crate::server::AppState;

/// Query carrying only a catalog id.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Catalog id (IMDb style)
    pub id: Option<String>,
}

/// Body of a direct stream link request.
#[derive(Debug, Default, Deserialize)]
pub struct StreamBody {
    /// Stream-file token from a playlist leaf
    pub file: Option<String>,
    /// Session key from the media info response
    pub key: Option<String>,
}

/// `GET /getM3u8`: full resolution from catalog id to playable link.
pub async fn api_m3u8(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Json<StreamResponse> {
    Json(state.resolver.resolve_response(&query).await)
}

/// `GET /mediaInfo`: raw playlist and session key for a catalog id.
pub async fn api_media_info(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Envelope<PlaylistTree>> {
    Json(fetch_media_info(&state, query.id.as_deref()).await)
}

/// `GET /getSeasonList`: seasons, episodes and their languages.
pub async fn api_season_list(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Envelope<Vec<SeasonOutline>>> {
    let envelope = match fetch_media_info(&state, query.id.as_deref())
        .await
        .into_data()
    {
        Ok(tree) => Envelope::ok(outline(&tree)),
        Err(message) => Envelope::failure(
            message.unwrap_or_else(|| "Failed to fetch media info".to_string()),
        ),
    };
    Json(envelope)
}

/// `POST /getStream`: playable link for a known file token and key.
pub async fn api_stream(
    State(state): State<AppState>,
    Json(body): Json<StreamBody>,
) -> Json<Envelope<StreamLink>> {
    let (Some(file), Some(key)) = (
        body.file.filter(|file| !file.is_empty()),
        body.key.filter(|key| !key.is_empty()),
    ) else {
        return Json(Envelope::failure("Please provide file and key"));
    };

    let request = StreamRequest { file, key };
    match state.resolver.links().stream_link(&request).await {
        Ok(envelope) => Json(envelope),
        Err(error) => {
            warn!(error = %error, "Stream link lookup failed");
            Json(Envelope::failure(error.to_string()))
        }
    }
}

async fn fetch_media_info(state: &AppState, id: Option<&str>) -> Envelope<PlaylistTree> {
    let Some(id) = id.filter(|id| !id.is_empty()) else {
        return Envelope::failure(ResolveError::MissingSelector.to_string());
    };

    match state.resolver.media_info().media_info(id).await {
        Ok(envelope) => envelope,
        Err(error) => {
            warn!(catalog_id = id, error = %error, "Media info lookup failed");
            Envelope::failure(error.to_string())
        }
    }
}
