//! Users API - user account REST service

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StorageBackend};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = match &config.storage {
        StorageBackend::Postgres(pg) => {
            let db = connect_from_config_with_retry(pg.clone(), None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            run_migrations::<Migrator>(&db, config.app.name).await?;
            Some(db)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; users are lost on restart");
            None
        }
    };

    let state = AppState { config, db };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // - /health: liveness with app name/version
    // - /ready: database check when postgres is in use
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting users API with graceful shutdown (30s timeout)"
    );

    let server_config = state.config.server.clone();
    let db = state.db;

    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        if let Some(db) = db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(()) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
