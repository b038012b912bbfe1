//! Store errors - failures reported by token store adapters

mod store_error;

pub use store_error::{StoreError, StoreResult};
