//! # session-core
//!
//! Domain layer containing token value objects, the token store port, and store errors.
//! This crate has zero dependencies on infrastructure (Redis, web framework, etc.).

pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use error::{StoreError, StoreResult};
pub use traits::{TokenEntry, TokenStore};
pub use value_objects::{Token, TokenKind, UserId, UserIdParseError};
