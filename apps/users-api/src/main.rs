use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Full application router: docs, middleware, users, `/health` and `/ready`.
fn app(state: AppState) -> Router {
    let api_routes = api::routes(&state)
        .merge(health_router())
        .merge(api::ready_router(state));

    create_router::<openapi::ApiDoc>(api_routes)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(environment = ?config.environment, "Connecting to PostgreSQL");

    let db = database::postgres::connect_from_config(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::check_health(&db)
        .await
        .map_err(|e| eyre::eyre!("Database not reachable at startup: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, "users_api")
            .await
            .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;
    }

    let state = AppState { config, db };
    let server_config = state.config.server.clone();
    let db = state.db.clone();

    let router = app(state);

    info!(
        address = %server_config.address(),
        timeout_secs = server_config.shutdown_timeout.as_secs(),
        "Starting users API with graceful shutdown"
    );

    create_production_app(router, &server_config, async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(()) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
