//! Reelpath Web - JSON API Server

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
//!
//! Exposes stream resolution, raw media info, direct link lookup and season
//! listings as JSON endpoints.

pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, build_router, run_server};
