use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use yikyak_config::Config;
use yikyak_translator::{LibreTranslateClient, TranslationApi};

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;


use self::cli::Args;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with rendered output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::new();
    args.apply(&mut config);

    let client = LibreTranslateClient::from_config(&config.translator)?;
    let metadata = client.metadata();
    tracing::info!(
        "Using {} at {} (api key required: {})",
        metadata.name,
        client.base_url(),
        metadata.requires_api_key
    );

    let state = Arc::new(AppState::new(config, Arc::new(client)));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks().await;

    tokio::select! {
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Shutdown requested"),
                Err(e) => tracing::error!("failed to listen for ctrl+c: {e}"),
            }
        }
        _ = controller.cancelled() => {
            tracing::info!("Quit requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::warn!("task ended with error during shutdown: {e}");
        }
    }

    Ok(())
}
