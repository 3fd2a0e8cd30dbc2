use account::{handler::AppRouter, state::AppState};
use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new("account-service", config.otel_endpoint.clone());

    let providers = telemetry.init().context("Failed to initialize telemetry")?;

    init_logger(
        &providers.logger,
        "account-service",
        config.dev_mode,
        config.enable_file_log,
    );

    info!("Starting account service initialization...");

    let db_pool = ConnectionManager::new_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = AppState::new(db_pool, &config).context("Failed to create AppState")?;

    let served = AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server");

    info!("🛑 Shutting down account service...");

    shutdown_after(served, || providers.shutdown())
}

/// Runs `shutdown` whatever `served` holds, so exporters flush even when serving failed.
fn shutdown_after<T>(served: Result<T>, shutdown: impl FnOnce() -> Result<()>) -> Result<T> {
    if let Err(e) = &served {
        error!("❌ Server stopped with error: {e:#}");
    }

    if let Err(e) = shutdown() {
        error!("Failed to shutdown telemetry: {e}");
    }

    served
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    info!("✅ Database migrations applied");

    Ok(())
}
