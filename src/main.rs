//! GitFit authentication server.
//!
//! Main entry point that wires the crates together and starts the HTTP
//! server: configuration, tracing, database pool and migrations, the
//! authentication components, and the Axum router with graceful
//! shutdown.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use gitfit_api::state::AppState;
use gitfit_core::config::AppConfig;
use gitfit_core::error::AppError;
use gitfit_database::{AccountRepository, ActivityRepository, DatabasePool};

#[tokio::main]
async fn main() {
    let env = std::env::var("GITFIT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting GitFit auth server v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    gitfit_database::migration::run_migrations(db.pool()).await?;

    let store = Arc::new(AccountRepository::new(db.pool().clone()));
    let activity = Arc::new(ActivityRepository::new(db.pool().clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace_seconds = config.server.shutdown_grace_seconds;

    let state = AppState::new(Arc::new(config), store, activity);
    let app = gitfit_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!(grace_seconds, "shutdown signal received, draining connections");
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(grace_seconds)).await;
                tracing::warn!("graceful shutdown grace period elapsed, forcing exit");
                std::process::exit(0);
            });
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }
}
