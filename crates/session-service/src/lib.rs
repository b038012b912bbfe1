//! # session-service
//!
//! Application layer: the session manager that issues, validates and rotates
//! session and refresh tokens, plus the request/response types around it.

pub mod dto;
pub mod services;

pub use dto::{
    ClearScope, HealthChecks, HealthResponse, IssuedToken, LoginOutcome, LoginRequest,
    ReadinessResponse,
};
pub use services::{SessionManager, SessionSettings};
