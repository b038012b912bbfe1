//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;

use axum::Router;
use session_cache::{connect_token_store, SharedTokenStore};
use session_common::{AppConfig, AppError};
use session_service::{SessionManager, SessionSettings};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router(&state);
    let router = apply_middleware(router, state.config().server.request_timeout());
    router.with_state(state)
}

/// Connect the configured token store and create AppState
///
/// For the Redis backend this pings the server and fails if it is unreachable.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(backend = ?config.store.backend, "Connecting token store...");
    let store = connect_token_store(&config).await?;
    info!("Token store ready");

    Ok(create_app_state_with_store(config, store))
}

/// Create AppState around an already constructed token store
pub fn create_app_state_with_store(config: AppConfig, store: SharedTokenStore) -> AppState {
    let settings = SessionSettings::from_config(&config);
    let sessions = SessionManager::new(Arc::clone(&store), settings);
    AppState::new(sessions, config)
}

/// Serve the application on an already bound listener until shutdown is signalled
pub async fn run_server(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read listener address: {}", e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, draining in-flight requests...");
        })
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Server error: {}", e)))?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    run_server(listener, app).await
}

/// Wait for Ctrl+C or SIGTERM
///
/// If a handler cannot be installed, that branch never resolves and the
/// other one still triggers shutdown.
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
}
