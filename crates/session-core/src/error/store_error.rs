use thiserror::Error;

/// Errors surfaced by a [`TokenStore`](crate::TokenStore) implementation
///
/// None of these are retried; every store failure is terminal for the request
/// that triggered it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection unavailable: {0}")]
    Pool(String),

    #[error("Store command failed: {0}")]
    Command(String),

    #[error("Corrupt value in store: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn pool(msg: impl Into<String>) -> Self {
        Self::Pool(msg.into())
    }

    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }

    /// Check if the store itself could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Pool(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
