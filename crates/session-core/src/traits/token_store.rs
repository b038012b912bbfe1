//! Token store port
//!
//! The session layer only needs four primitives from a key-value store:
//! `GET`, `SET` with a TTL, an all-or-nothing multi-`SET`, and a liveness probe.
//! Keys are token values, values are user ids, and an absent key is
//! indistinguishable from an expired one.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::value_objects::{Token, UserId};

/// A single `token -> user id` record with its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry {
    pub token: Token,
    pub user_id: UserId,
    pub ttl: Duration,
}

impl TokenEntry {
    pub fn new(token: Token, user_id: UserId, ttl: Duration) -> Self {
        Self { token, user_id, ttl }
    }
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Resolve the user a token was issued to
    ///
    /// Returns `Ok(None)` when the token is unknown or has expired.
    async fn get(&self, token: &Token) -> StoreResult<Option<UserId>>;

    /// Store a single token with a TTL
    async fn set(&self, token: &Token, user_id: UserId, ttl: Duration) -> StoreResult<()>;

    /// Store several tokens as one atomic unit
    ///
    /// Either every entry is written or none is.
    async fn set_all(&self, entries: &[TokenEntry]) -> StoreResult<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> StoreResult<()>;
}
