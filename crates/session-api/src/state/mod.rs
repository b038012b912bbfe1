//! Application state
//!
//! Holds the shared state for the Axum application: the session manager and
//! the configuration it was built from.

use std::sync::Arc;

use session_common::AppConfig;
use session_service::{SessionManager, SessionSettings};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionManager>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(sessions: SessionManager, config: AppConfig) -> Self {
        Self {
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }

    /// Get the session manager
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Session cookie names and lifetimes
    pub fn settings(&self) -> &SessionSettings {
        self.sessions.settings()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &"SessionManager")
            .field("config", &"AppConfig")
            .finish()
    }
}
