//! Player API client against a local fake player front-end.

use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::{get, post};
use reelpath_core::{
    DiscoveryError, MediaInfoProvider, StreamLinkResolver, StreamRequest, UpstreamConfig,
};
use reelpath_upstream::{DomainLocator, PlayerApi, build_client};
use tokio::net::TcpListener;

const KEY: &str = "k1";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-csrf-token")
        .and_then(|value| value.to_str().ok())
        == Some(KEY)
}

async fn landing(State(base): State<String>) -> Html<String> {
    Html(format!(
        "<html><head><script>const AwsIndStreamDomain = '{base}/';</script></head></html>"
    ))
}

async fn play_page(Path(id): Path<String>) -> Result<Html<String>, StatusCode> {
    if id != "tt123" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Html(format!(
        r#"<html><script>let pc = {{"file":"/list/abc","key":"{KEY}"}};</script></html>"#
    )))
}

async fn playlist(headers: HeaderMap) -> Result<String, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(r#"[{"title":"Season 1","id":"1","folder":[
            {"title":"Episode 2","id":"1-2","episode":"2","folder":[
                {"title":"French","id":"1-2-0","file":"~abc.m3u8"}
            ]}
        ]}]"#
        .to_string())
}

async fn stream_link(Path(name): Path<String>, headers: HeaderMap) -> Result<String, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::FORBIDDEN);
    }
    match name.strip_suffix(".txt") {
        Some("abc.m3u8") => Ok("https://cdn.example/abc/index.m3u8\n".to_string()),
        Some("empty") => Ok("   ".to_string()),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

/// Starts the fake player and returns its base URL.
async fn spawn_player() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/", get(landing))
        .route("/play/{id}", get(play_page))
        .route("/list/abc", post(playlist))
        .route("/playlist/{name}", post(stream_link))
        .with_state(base.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    base
}

/// Address nothing listens on.
async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    address
}

fn config(entry_url: Option<String>, fallback: Option<&str>) -> UpstreamConfig {
    UpstreamConfig {
        entry_url,
        fallback_domain: fallback.map(str::to_string),
        request_timeout: Duration::from_secs(5),
        ..UpstreamConfig::default()
    }
}

#[tokio::test]
async fn test_locator_discovers_domain_from_landing_page() {
    let base = spawn_player().await;
    let config = config(Some(format!("{base}/")), None);
    let locator = DomainLocator::new(build_client(&config).unwrap(), &config);

    assert_eq!(locator.locate().await.unwrap(), base);
}

#[tokio::test]
async fn test_locator_falls_back_when_fetch_fails() {
    let config = config(
        Some(closed_address().await),
        Some("https://fallback.example/"),
    );
    let locator = DomainLocator::new(build_client(&config).unwrap(), &config);

    assert_eq!(locator.locate().await.unwrap(), "https://fallback.example");
}

#[tokio::test]
async fn test_locator_without_entry_or_fallback_fails() {
    let config = config(None, None);
    let locator = DomainLocator::new(build_client(&config).unwrap(), &config);

    assert_eq!(locator.locate().await, Err(DiscoveryError::DomainNotFound));
}

#[tokio::test]
async fn test_media_info_fetches_playlist_with_key() {
    let base = spawn_player().await;
    let api = PlayerApi::new(&config(Some(base), None)).unwrap();

    let tree = api.media_info("tt123").await.unwrap().into_data().unwrap();

    assert_eq!(tree.key, KEY);
    assert_eq!(tree.playlist.len(), 1);
    assert_eq!(tree.playlist[0].title(), "Season 1");
}

#[tokio::test]
async fn test_media_info_unknown_title_is_failure_envelope() {
    let base = spawn_player().await;
    let api = PlayerApi::new(&config(Some(base), None)).unwrap();

    let envelope = api.media_info("tt404").await.unwrap();

    assert!(!envelope.success);
    assert_eq!(
        envelope.message.as_deref(),
        Some("Play page returned HTTP 404 Not Found")
    );
}

#[tokio::test]
async fn test_stream_link_strips_token_prefix() {
    let base = spawn_player().await;
    let api = PlayerApi::new(&config(Some(base), None)).unwrap();

    let link = api
        .stream_link(&StreamRequest {
            file: "~abc.m3u8".to_string(),
            key: KEY.to_string(),
        })
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(link.link.as_deref(), Some("https://cdn.example/abc/index.m3u8"));
}

#[tokio::test]
async fn test_stream_link_rejections_are_failure_envelopes() {
    let base = spawn_player().await;
    let api = PlayerApi::new(&config(Some(base), None)).unwrap();

    let wrong_key = api
        .stream_link(&StreamRequest {
            file: "abc.m3u8".to_string(),
            key: "stale".to_string(),
        })
        .await
        .unwrap();
    assert!(!wrong_key.success);

    let empty = api
        .stream_link(&StreamRequest {
            file: "empty".to_string(),
            key: KEY.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(empty.message.as_deref(), Some("Empty stream link response"));
}

#[tokio::test]
async fn test_unreachable_domain_is_network_error() {
    let closed = closed_address().await;
    let api = PlayerApi::new(&config(None, Some(&closed))).unwrap();

    let error = api.media_info("tt123").await.unwrap_err();
    assert!(matches!(error, reelpath_core::UpstreamError::Network { .. }));
}
