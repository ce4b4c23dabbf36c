use mt_server::{AppState, Metrics, bootstrap, build_router, logger, metrics};

use mt_config::Config;
use mt_db::{migrate_identity, migrate_store, open_pool};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

// How often fully refilled rate limit buckets are dropped
const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(&config.logging, config.log_file_path()?)?;

    info!("Starting mt-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Document store database
    let store_path = config.store_database_path()?;
    info!("Opening document store: {}", store_path.display());
    let store_pool = open_pool(&store_path, config.database.max_connections).await?;
    migrate_store(&store_pool).await?;

    // Identity provider database
    let identity_path = config.identity_database_path()?;
    info!("Opening identity store: {}", identity_path.display());
    let identity_pool = open_pool(&identity_path, config.database.max_connections).await?;
    migrate_identity(&identity_pool).await?;

    info!("Migrations complete");

    let account_deletion =
        bootstrap::account_deletion_service(&config, store_pool.clone(), identity_pool.clone());
    let jwt_validator = Arc::new(bootstrap::build_jwt_validator(&config)?);
    let rate_limiter = Arc::new(bootstrap::rate_limiter(&config));

    let metrics_handle = if config.metrics.enabled {
        Some(metrics::install_recorder()?)
    } else {
        warn!("Metrics disabled, /metrics will return 404");
        None
    };

    let app_state = AppState {
        account_deletion,
        jwt_validator,
        rate_limiter: rate_limiter.clone(),
        metrics: Metrics::new(),
        metrics_handle,
        store_pool: store_pool.clone(),
        identity_pool: identity_pool.clone(),
    };

    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            rate_limiter.prune();
        }
    });

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => {
                    error!("Failed to listen for SIGINT: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    store_pool.close().await;
    identity_pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}
