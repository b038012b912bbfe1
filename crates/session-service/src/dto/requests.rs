//! Request DTOs with validation

use serde::Deserialize;
use validator::Validate;

/// Login request body
///
/// No format check on `email`: the accepted demo login is not an address.
/// Absent fields decode as empty strings and fail the credential check.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(max = 320, message = "Email too long"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 1024, message = "Password too long"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
