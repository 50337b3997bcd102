//! Employee Base - An in-memory employee records server
//!
//! Serves the employee API over plain HTTP, or over TLS 1.3 when started with
//! `--certfile` and `--keyfile`.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use employee_base::{api::create_router, config::DEFAULT_LOG_FILTER, tls, AppState, Cli, Config};

/// How long in-flight TLS connections get to finish after a shutdown signal.
const TLS_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Main entry point for the employee server.
///
/// # Startup Sequence
/// 1. Parse command line flags
/// 2. Initialize tracing subscriber for logging
/// 3. Load configuration from environment variables
/// 4. Create the employee store and credential table
/// 5. Create Axum router with all endpoints
/// 6. Serve plain HTTP or TLS on the configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting employee server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: host={}, port={}, credentials_file={:?}",
        config.server_host, config.server_port, config.credentials_file
    );

    let state = AppState::from_config(&config).context("failed to initialise application state")?;
    let app = create_router(state);
    let addr = config.socket_addr();

    match cli.tls_paths() {
        Some((cert, key)) => {
            let rustls_config =
                tls::rustls_config(cert, key).context("failed to load TLS configuration")?;

            let handle = axum_server::Handle::new();
            let shutdown_handle = handle.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                shutdown_handle.graceful_shutdown(Some(TLS_SHUTDOWN_GRACE));
            });

            info!("Server listening on https://{} (TLS 1.3)", addr);
            axum_server::bind_rustls(addr, rustls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("TLS server error")?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {}", addr))?;
            info!("Server listening on http://{}", addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("HTTP server error")?;
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
