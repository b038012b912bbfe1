//! Application error types
//!
//! Unified error handling for the session layer. Every variant maps to a fixed
//! HTTP status and a static message; nothing here is retried.

use session_core::{StoreError, TokenKind};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Request errors
    #[error("Invalid credentials payload: {0}")]
    InvalidPayload(String),

    // Authentication errors
    #[error("Invalid email/password")]
    InvalidCredentials,

    #[error("Missing {0} token")]
    MissingToken(TokenKind),

    #[error("Invalid or expired {0} token")]
    InvalidToken(TokenKind),

    // Store errors
    #[error("Session storage unavailable")]
    Storage(#[from] StoreError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidPayload(_) => 400,

            // 401 Unauthorized
            Self::InvalidCredentials | Self::MissingToken(_) | Self::InvalidToken(_) => 401,

            // 500 Internal Server Error
            Self::Storage(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingToken(_) => "MISSING_TOKEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error denies access (bad credentials or a missing/invalid token)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == 401
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Create an invalid payload error
    #[must_use]
    pub fn invalid_payload(msg: impl std::fmt::Display) -> Self {
        Self::InvalidPayload(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
