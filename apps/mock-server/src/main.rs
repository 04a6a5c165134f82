//! # Zebraget Mock Server
//!
//! Serves `db.json` as the product resource on port 3000.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zebraget_mock_server::{router, AppState, ProductStore, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,zebraget=debug,tower_http=debug")),
        )
        .with_target(true)
        .init();

    info!("Starting Zebraget mock server...");

    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        db_path = ?config.db_path,
        static_dir = ?config.static_dir,
        "Configuration loaded"
    );

    let store = ProductStore::open(&config.db_path).await?;
    let app = router(AppState::new(store), &config.static_dir);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Serving products at http://{}/products", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
