//! Application assembly and the serve loop.

use crate::di::build_module;
use axum::Router;
use rota_config::AppConfig;
use rota_core::{RotaError, RotaResult};
use rota_rest::create_router;
use tokio::signal;
use tracing::{error, info};

/// Builds the HTTP router with all dependencies wired from configuration.
pub fn build_router(config: &AppConfig) -> RotaResult<Router> {
    let module = build_module(config)?;
    Ok(create_router(module.as_ref(), config))
}

/// Binds the configured address and serves until a shutdown signal arrives.
pub async fn serve(config: AppConfig) -> RotaResult<()> {
    let router = build_router(&config)?;

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RotaError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RotaError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
