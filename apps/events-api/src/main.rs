use axum_helpers::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use events_api::config::Config;
use events_api::state::AppState;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::connect(config).await?;
    let app = events_api::app(&state);
    let server = state.config.server.clone();
    let mongo_client = state.mongo_client().cloned();

    info!("Starting Events API with graceful shutdown (30s timeout)");

    create_production_app(app, &server, Duration::from_secs(30), async move {
        if let Some(client) = mongo_client {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Events API shutdown complete");
    Ok(())
}
