//! Traits (ports) - interfaces the domain needs from infrastructure

mod token_store;

pub use token_store::{TokenEntry, TokenStore};
