//! Business logic services

mod session;

pub use session::{SessionManager, SessionSettings};
