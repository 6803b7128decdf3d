// src/main.rs
use anyhow::Result;
use service_health::{
    config::{self, Config},
    health::{CacheProbe, DatabaseProbe, HealthAggregator, MessagingApiProbe},
    server::{HealthHandler, ServerBuilder},
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// Idle connections above `min_connections` are reaped after this long, and
/// the pool tops itself back up to `min_connections` on the same period.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("service_health=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path)?;

    let pool = connect_pool(&config).await;
    let aggregator = build_aggregator(&config, pool);

    let addr = config.server.listen_addr()?;
    info!("Starting health service on {}", addr);

    ServerBuilder::new(addr)
        .with_handler(HealthHandler::new(aggregator))
        .serve_with_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Connect eagerly so the pool starts warm; if the database is down at boot
/// fall back to a lazy pool and let the health endpoint report it.
async fn connect_pool(config: &Config) -> PgPool {
    let options = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .idle_timeout(POOL_IDLE_TIMEOUT)
        .acquire_timeout(config.health.probe_timeout());

    match options
        .clone()
        .connect_with(config.database.connect_options())
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "Database unavailable at startup, continuing with a lazy pool");
            options.connect_lazy_with(config.database.connect_options())
        }
    }
}

fn build_aggregator(config: &Config, pool: PgPool) -> HealthAggregator {
    let timeout = config.health.probe_timeout();

    HealthAggregator::new(
        Arc::new(DatabaseProbe::new(pool, timeout)),
        Arc::new(CacheProbe::new(config.redis.url.clone(), timeout)),
        Arc::new(MessagingApiProbe::new(
            config.telegram.api_base_url.clone(),
            config.telegram.bot_token.clone(),
            timeout,
        )),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
