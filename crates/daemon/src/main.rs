//! SwipeMatch Daemon - Main Entry Point
//! Serves the match engine over JSON-RPC, backed by SQLite

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{DaemonConfig, LogFormat};
use swipematch_api_rpc::{server::RpcServerConfig, RpcServer};
use swipematch_core::application::MatchEngine;
use swipematch_core::port::time_provider::SystemTimeProvider;
use swipematch_infra_sqlite::{create_pool, current_schema_version, run_migrations, SqliteDatastore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("swipematch=info"))
        .context("Failed to create env filter")?;

    let otel = telemetry::telemetry_layer()?;

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(otel)
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(otel)
            .with(env_filter)
            .with(fmt::layer().pretty())
            .try_init()?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration (env only, resolved once)
    let config = DaemonConfig::from_env()?;

    // 2. Logging
    init_logging(config.log_format)?;
    info!("SwipeMatch v{} starting...", VERSION);

    // 3. Database
    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
    }

    info!(db_path = %config.db_path, "Initializing database...");
    let pool = create_pool(&config.db_path)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;
    let schema_version = current_schema_version(&pool).await?;
    info!(schema_version, "Database ready");

    // 4. DI wiring
    let datastore = Arc::new(SqliteDatastore::new(pool.clone()));
    let time_provider = Arc::new(SystemTimeProvider);
    let engine = Arc::new(
        MatchEngine::new(datastore, time_provider).with_policy(config.transition_policy),
    );
    info!(policy = %config.transition_policy, "Match engine ready");

    // 5. JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let rpc_handle = RpcServer::new(rpc_config, engine)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!("System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;
    pool.close().await;
    telemetry::shutdown_telemetry();

    info!("Shutdown complete.");
    Ok(())
}
