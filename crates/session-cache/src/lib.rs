//! # session-cache
//!
//! Key-value storage for session and refresh tokens.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Redis Store**: `GET`, `SET EX` and `MULTI/EXEC` pair writes
//! - **Memory Store**: In-process TTL map for local runs and tests
//!
//! ## Example
//!
//! ```ignore
//! use session_cache::{connect_token_store};
//!
//! let store = connect_token_store(&config).await?;
//! store.set(&token, user_id, Duration::from_secs(3600)).await?;
//! assert_eq!(store.get(&token).await?, Some(user_id));
//! ```

pub mod pool;
pub mod store;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export store types
pub use store::{connect_token_store, MemoryTokenStore, RedisTokenStore, SharedTokenStore};
