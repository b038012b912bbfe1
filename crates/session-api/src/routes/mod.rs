//! Route definitions

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{auth, cookies, health, protected};
use crate::middleware::require_session;
use crate::state::AppState;

/// Create the router with every route; unmatched paths fall through to static files
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(session_routes())
        .merge(cookie_routes())
        .merge(protected_routes(state.clone()))
        .merge(health_routes())
        .fallback_service(ServeDir::new(&state.config().server.static_dir))
}

/// Login and refresh
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
}

/// Cookie-clearing routes
fn cookie_routes() -> Router<AppState> {
    Router::new()
        .route("/clear-cookies", get(cookies::clear_cookies))
        .route("/clear-session", get(cookies::clear_session))
        .route("/clear-refresh", get(cookies::clear_refresh))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Routes that require a valid session cookie
///
/// Needs the state up front because the gate runs as route middleware.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/protected", get(protected::protected))
        .route_layer(from_fn_with_state(state, require_session))
}
