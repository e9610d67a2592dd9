//! # Varejo API Server
//!
//! Binary entry point: configuration, tracing, pool, listener.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use varejo_api::{router, ApiConfig, AppState};
use varejo_db::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (RUST_LOG, default info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("Starting Varejo API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        addr = %config.socket_addr(),
        request_timeout_ms = config.request_timeout.as_millis() as u64,
        db_url = %config.database_url.chars().take(30).collect::<String>(),
        "Configuration loaded"
    );

    // Connect to database
    let db = Database::connect(config.db_config()).await?;
    info!("Connected to PostgreSQL");

    let addr = config.socket_addr();
    let state = Arc::new(AppState {
        db: db.clone(),
        config,
    });

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
