//! In-memory token store.
//!
//! Entries expire after their TTL and an expired entry reads as absent. Expired
//! entries are purged when read and swept on every write, so the map stays
//! bounded by the number of live tokens plus whatever expired since the last
//! write. Deadlines use the tokio clock, so tests can drive expiry with
//! `tokio::time::pause`/`advance`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use session_core::{StoreError, StoreResult, Token, TokenEntry, TokenStore, UserId};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
struct StoredToken {
    user_id: UserId,
    expires_at: Instant,
}

impl StoredToken {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Token store held in process memory
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: Arc<DashMap<String, StoredToken>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, as if the store were unreachable
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Expire a token immediately, as if its TTL had elapsed
    pub fn expire(&self, token: &Token) -> bool {
        self.entries.remove(token.as_str()).is_some()
    }

    /// Remaining lifetime of a live token
    #[must_use]
    pub fn ttl(&self, token: &Token) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(token.as_str())
            .filter(|stored| stored.is_live(now))
            .map(|stored| stored.expires_at - now)
    }

    /// Number of live tokens
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| e.is_live(now)).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, stored| stored.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::pool("memory store rejecting writes"));
        }
        Ok(())
    }

    fn insert(&self, token: &Token, user_id: UserId, ttl: Duration) {
        self.entries.insert(
            token.as_str().to_string(),
            StoredToken {
                user_id,
                expires_at: Instant::now() + ttl,
            },
        );
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, token: &Token) -> StoreResult<Option<UserId>> {
        let now = Instant::now();
        let stored = self.entries.get(token.as_str()).map(|e| *e);

        match stored {
            Some(stored) if stored.is_live(now) => Ok(Some(stored.user_id)),
            Some(_) => {
                self.entries
                    .remove_if(token.as_str(), |_, stored| !stored.is_live(now));
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, token: &Token, user_id: UserId, ttl: Duration) -> StoreResult<()> {
        self.check_writable()?;
        self.purge_expired();
        self.insert(token, user_id, ttl);
        Ok(())
    }

    async fn set_all(&self, entries: &[TokenEntry]) -> StoreResult<()> {
        // Failure is decided before the first insert, so a batch lands whole or not at all
        self.check_writable()?;
        self.purge_expired();
        for entry in entries {
            self.insert(&entry.token, entry.user_id, entry.ttl);
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
