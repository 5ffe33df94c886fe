//! Tag-QR Service - SuperApp webhook receiver.
//!
//! This binary:
//! - Verifies SuperApp request hashes
//! - Answers price lookups
//! - Acknowledges gate-open requests and reports their outcome via callback
//! - Shuts down gracefully on SIGINT/SIGTERM

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tagqr::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; variables already set in the environment win.
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("tagqr_service_starting");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        port = config.port,
        callback_timeout_ms = config.callback_timeout_ms,
        dotenv_loaded = dotenv_loaded,
        "config_loaded"
    );

    let state = AppState::from_config(&config).context("Failed to create HTTP client")?;
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "tagqr_service_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("tagqr_service_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("tagqr_service_shutting_down");
}
