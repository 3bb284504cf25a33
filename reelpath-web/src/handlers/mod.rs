//! HTTP request handlers

pub mod api;

// Re-export handler functions
pub use api::{CatalogQuery, StreamBody, api_m3u8, api_media_info, api_season_list, api_stream};
