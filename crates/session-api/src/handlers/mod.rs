//! Route handlers

pub mod auth;
pub mod cookies;
pub mod health;
pub mod protected;
