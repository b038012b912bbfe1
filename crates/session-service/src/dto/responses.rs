//! Response types returned by the session manager and health endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;
use session_core::{Token, TokenKind};

/// A freshly minted token and the deadline it stops being valid at
///
/// The deadline doubles as the cookie `Expires` attribute.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub kind: TokenKind,
    pub token: Token,
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful login call
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// New session and refresh tokens were stored
    Authenticated {
        session: IssuedToken,
        refresh: IssuedToken,
    },
    /// The caller already carried a session cookie; nothing was stored
    AlreadyAuthenticated,
}

impl LoginOutcome {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Authenticated { .. } => "auth success",
            Self::AlreadyAuthenticated => "already authenticated",
        }
    }
}

/// Which cookies a clear operation expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    Session,
    Refresh,
    All,
}

impl ClearScope {
    #[must_use]
    pub fn kinds(&self) -> &'static [TokenKind] {
        match self {
            Self::Session => &[TokenKind::Session],
            Self::Refresh => &[TokenKind::Refresh],
            Self::All => &[TokenKind::Session, TokenKind::Refresh],
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Session => "session cookie cleared",
            Self::Refresh => "refresh cookie cleared",
            Self::All => "all cookies cleared",
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub token_store: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                token_store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
