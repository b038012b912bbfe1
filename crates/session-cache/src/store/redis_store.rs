//! Redis-backed token store.
//!
//! Each token is a plain string key holding the decimal user id, written with
//! `SET key value EX ttl`. Multi-entry writes go through one `MULTI/EXEC`
//! pipeline so a login never leaves a session token without its refresh token.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use session_core::{StoreError, StoreResult, Token, TokenEntry, TokenStore, UserId};

use crate::pool::{RedisPool, RedisPoolError};

/// Token store over a pooled Redis connection
#[derive(Debug, Clone)]
pub struct RedisTokenStore {
    pool: RedisPool,
    key_prefix: String,
}

impl RedisTokenStore {
    /// Create a store that uses raw token values as keys
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self::with_prefix(pool, String::new())
    }

    /// Create a store that namespaces every key
    #[must_use]
    pub fn with_prefix(pool: RedisPool, key_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            key_prefix: key_prefix.into(),
        }
    }

    /// Generate Redis key for a token
    fn key(&self, token: &Token) -> String {
        format!("{}{}", self.key_prefix, token.as_str())
    }
}

/// Redis expiry granularity is one second; never send `EX 0`
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn get(&self, token: &Token) -> StoreResult<Option<UserId>> {
        let mut conn = self.pool.get().await?;
        let value: Option<String> = conn
            .get(self.key(token))
            .await
            .map_err(RedisPoolError::from)?;

        value
            .map(|raw| {
                UserId::parse(&raw).map_err(|e| {
                    tracing::warn!(token = %token.redacted(), "Token maps to a non-integer value");
                    StoreError::corrupt(e.to_string())
                })
            })
            .transpose()
    }

    async fn set(&self, token: &Token, user_id: UserId, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.pool.get().await?;
        conn.set_ex::<_, _, ()>(self.key(token), user_id.into_inner(), ttl_seconds(ttl))
            .await
            .map_err(RedisPoolError::from)?;

        tracing::debug!(
            token = %token.redacted(),
            user_id = %user_id,
            ttl_secs = ttl.as_secs(),
            "Stored token"
        );

        Ok(())
    }

    async fn set_all(&self, entries: &[TokenEntry]) -> StoreResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for entry in entries {
            pipe.set_ex(
                self.key(&entry.token),
                entry.user_id.into_inner(),
                ttl_seconds(entry.ttl),
            )
            .ignore();
        }

        let mut conn = self.pool.get().await?;
        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(RedisPoolError::from)?;

        tracing::debug!(count = entries.len(), "Stored tokens in one transaction");

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.pool.health_check().await?;
        Ok(())
    }
}
