//! Routes behind the session gate

use axum::Extension;

use crate::middleware::AuthUser;

/// GET /protected
pub async fn protected(Extension(auth): Extension<AuthUser>) -> String {
    format!("userId from session: {}", auth.user_id)
}
