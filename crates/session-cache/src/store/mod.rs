//! Token store adapters.
//!
//! Two implementations of [`session_core::TokenStore`]:
//! - Redis, for real deployments
//! - an in-process map, for local runs and tests
//!
//! The backend is picked from configuration at startup.

mod memory_store;
mod redis_store;

use std::sync::Arc;

use session_common::{AppConfig, StoreBackend};
use session_core::{StoreResult, TokenStore};
use tracing::info;

use crate::pool::RedisPool;

pub use memory_store::MemoryTokenStore;
pub use redis_store::RedisTokenStore;

/// Process-wide token store handle
pub type SharedTokenStore = Arc<dyn TokenStore>;

/// Open the configured token store
///
/// For Redis this pings the server once and fails if it cannot be reached,
/// so a misconfigured store stops the process at startup.
pub async fn connect_token_store(config: &AppConfig) -> StoreResult<SharedTokenStore> {
    match config.store.backend {
        StoreBackend::Redis => {
            info!("Connecting to Redis...");
            let pool = RedisPool::from_config(&config.redis)?;
            pool.health_check().await?;
            info!("Redis connection established");
            Ok(Arc::new(RedisTokenStore::with_prefix(
                pool,
                config.store.key_prefix.clone(),
            )))
        }
        StoreBackend::Memory => {
            info!("Using in-memory token store");
            Ok(Arc::new(MemoryTokenStore::new()))
        }
    }
}
