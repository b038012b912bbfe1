//! # session-api
//!
//! HTTP binding for the session manager, built with Axum.

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_app_state_with_store, run, run_server};
pub use state::AppState;
