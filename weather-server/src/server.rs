//! Listener setup and graceful shutdown

use anyhow::Context;
use tokio::{net::TcpListener, signal};
use tracing::info;
use weather_core::Config;

use crate::{routes, state::AppState};

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = routes::build_app(state, &config.server)?;

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        %addr,
        provider = %config.provider.base_url,
        allowed_origin = ?config.server.allowed_origin,
        "Weather API listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
