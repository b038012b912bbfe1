//! Authentication handlers
//!
//! Login issues the session/refresh cookie pair; refresh mints a new session
//! cookie from the refresh cookie.

use axum::extract::State;
use axum_extra::extract::CookieJar;
use session_core::TokenKind;
use session_service::{LoginOutcome, LoginRequest};

use crate::cookies;
use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Login with email and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, &'static str)> {
    let settings = state.settings();
    let existing = cookies::value(&jar, settings.cookie_name(TokenKind::Session));

    let outcome = state.sessions().login(&request, existing).await?;
    let message = outcome.message();

    let jar = match outcome {
        LoginOutcome::Authenticated { session, refresh } => jar
            .add(cookies::token_cookie(settings.cookie_name(session.kind), &session)?)
            .add(cookies::token_cookie(settings.cookie_name(refresh.kind), &refresh)?),
        LoginOutcome::AlreadyAuthenticated => jar,
    };

    Ok((jar, message))
}

/// Mint a new session from the refresh cookie
///
/// POST /refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, &'static str)> {
    let settings = state.settings();
    let refresh_token = cookies::value(&jar, settings.cookie_name(TokenKind::Refresh));

    let session = state.sessions().refresh(refresh_token).await?;
    let cookie = cookies::token_cookie(settings.cookie_name(session.kind), &session)?;

    Ok((jar.add(cookie), "session refreshed"))
}
