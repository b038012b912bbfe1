//! Cookie clearing handlers
//!
//! These only expire cookies on the client. Store entries stay valid until
//! their TTL lapses.

use axum::extract::State;
use axum_extra::extract::CookieJar;
use session_service::ClearScope;

use crate::cookies::expire_all;
use crate::state::AppState;

fn clear(state: &AppState, jar: CookieJar, scope: ClearScope) -> (CookieJar, &'static str) {
    let names = state.sessions().clear(scope);
    tracing::debug!(?scope, ?names, "Expiring cookies");
    (expire_all(jar, names), scope.message())
}

/// GET /clear-cookies
pub async fn clear_cookies(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, &'static str) {
    clear(&state, jar, ClearScope::All)
}

/// GET /clear-session
pub async fn clear_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, &'static str) {
    clear(&state, jar, ClearScope::Session)
}

/// GET /clear-refresh
pub async fn clear_refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, &'static str) {
    clear(&state, jar, ClearScope::Refresh)
}
