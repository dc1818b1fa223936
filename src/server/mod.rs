pub mod app;
pub mod handlers;
pub mod middleware;

pub use app::{create_app, AppState};
pub use handlers::{add_codeql_workflow, add_collaborator, clone_url, create_repository, health_check};

use crate::client::GitHubGateway;
use crate::config::{Config, ConfigLoader};
use crate::error::{AppError, ServerError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Open the GitHub session, bind the listener and serve until shutdown.
///
/// Every fatal condition (missing token, invalid configuration, rejected
/// credentials) is reported before the listener is bound.
pub async fn run_server(config: Config) -> Result<(), AppError> {
    config.validate()?;
    let token = ConfigLoader::token_from_env()?;

    let gateway = GitHubGateway::connect(&config.github, token).await?;
    info!(
        "GitHub session ready for {} via {}",
        gateway.login(),
        config.github.api_url
    );

    let state = AppState::new(Arc::new(gateway));

    let bind_addr = config.server.bind_address();
    let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
        AppError::Server(ServerError::BindError {
            address: bind_addr.clone(),
            source: e,
        })
    })?;

    info!("Server listening on http://{}", bind_addr);
    serve(listener, state).await
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), AppError> {
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(ServerError::StartupError(format!("server error: {}", e))))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
