//! Value objects - immutable types that represent domain concepts

mod token;
mod user_id;

pub use token::{Token, TokenKind};
pub use user_id::{UserId, UserIdParseError};
