//! Data transfer objects for the session endpoints
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response types handed back to the HTTP layer

pub mod requests;
pub mod responses;

pub use requests::LoginRequest;
pub use responses::{
    ClearScope, HealthChecks, HealthResponse, IssuedToken, LoginOutcome, ReadinessResponse,
};
