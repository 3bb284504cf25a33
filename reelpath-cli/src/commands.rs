//! CLI command implementations

use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use reelpath_core::{ReelpathConfig, StreamQuery, StreamResolver};
use reelpath_upstream::PlayerApi;
use tracing::info;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the JSON API server
    Serve {
        /// Host to bind to (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Resolve one catalog id and print the response
    Resolve {
        /// Catalog id (IMDb style)
        id: String,
        /// Season number; needs --episode
        #[arg(short, long)]
        season: Option<String>,
        /// Episode number; needs --season
        #[arg(short, long)]
        episode: Option<String>,
        /// Language title, English when omitted
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Discover and print the current player domain
    Domain,
}

/// Handle the CLI command
///
/// # Errors
/// Returns the failure of the command that ran
pub async fn handle_command(command: Commands, config: ReelpathConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port } => serve(config, host, port).await,
        Commands::Resolve {
            id,
            season,
            episode,
            lang,
        } => {
            let query = StreamQuery {
                id: Some(id),
                season,
                episode,
                lang,
            };
            resolve(&config, &query).await
        }
        Commands::Domain => domain(&config).await,
    }
}

/// Start the API server with optional bind overrides
///
/// # Errors
/// - Server failed to bind or the HTTP client could not be built
pub async fn serve(
    mut config: ReelpathConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    reelpath_web::run_server(config)
        .await
        .map_err(|error| anyhow::anyhow!("Server error: {error}"))
}

/// Resolve a single query against the live player and print the JSON response
///
/// # Errors
/// - HTTP client could not be built
/// - Response could not be serialized
pub async fn resolve(config: &ReelpathConfig, query: &StreamQuery) -> anyhow::Result<()> {
    let player = Arc::new(PlayerApi::new(&config.upstream).context("Failed to build HTTP client")?);
    let resolver = StreamResolver::new(player.clone(), player);

    let response = resolver.resolve_response(query).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Print the player domain the locator currently resolves to
///
/// # Errors
/// - HTTP client could not be built
/// - No strategy matched and no fallback is configured
pub async fn domain(config: &ReelpathConfig) -> anyhow::Result<()> {
    let player = PlayerApi::new(&config.upstream).context("Failed to build HTTP client")?;
    let domain = player.locator().locate().await?;

    info!(domain = %domain, "Located player domain");
    println!("{domain}");
    Ok(())
}
