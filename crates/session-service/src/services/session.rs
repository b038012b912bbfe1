//! Session manager
//!
//! Issues, validates and rotates session and refresh tokens against a
//! [`TokenStore`]. Each token is an independent `token -> user id` record with its
//! own TTL; nothing is ever revoked early, records only disappear on expiry.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use session_common::{AppConfig, AppError, AppResult};
use session_core::{Token, TokenEntry, TokenKind, TokenStore, UserId};
use tracing::{debug, error, info, instrument, warn};

use crate::dto::{ClearScope, IssuedToken, LoginOutcome, LoginRequest};

/// Everything the session manager needs besides the store
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub session_cookie: String,
    pub refresh_cookie: String,
    pub session_ttl: Duration,
    pub refresh_ttl: Duration,
    pub demo_email: String,
    pub demo_password: String,
    pub demo_user_id: UserId,
}

impl SessionSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            session_cookie: config.session.session_cookie.clone(),
            refresh_cookie: config.session.refresh_cookie.clone(),
            session_ttl: config.session.session_ttl(),
            refresh_ttl: config.session.refresh_ttl(),
            demo_email: config.demo.email.clone(),
            demo_password: config.demo.password.clone(),
            demo_user_id: UserId::new(config.demo.user_id),
        }
    }

    /// Cookie name carrying tokens of the given kind
    #[must_use]
    pub fn cookie_name(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Session => &self.session_cookie,
            TokenKind::Refresh => &self.refresh_cookie,
        }
    }

    #[must_use]
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Session => self.session_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Mediates every read and write of session and refresh tokens
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    settings: SessionSettings,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &"TokenStore")
            .field("settings", &self.settings)
            .finish()
    }
}

impl SessionManager {
    /// Create a new SessionManager
    pub fn new(store: Arc<dyn TokenStore>, settings: SessionSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Check credentials and issue a session/refresh token pair
    ///
    /// A non-empty `existing_session` short-circuits to
    /// [`LoginOutcome::AlreadyAuthenticated`]. The cookie's presence is trusted
    /// as-is; it is not looked up in the store.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login(
        &self,
        request: &LoginRequest,
        existing_session: Option<&str>,
    ) -> AppResult<LoginOutcome> {
        if !self.credentials_match(request) {
            warn!("Login failed: invalid email/password");
            return Err(AppError::InvalidCredentials);
        }

        if existing_session.is_some_and(|token| !token.is_empty()) {
            debug!("Session cookie already present, skipping token issue");
            return Ok(LoginOutcome::AlreadyAuthenticated);
        }

        let user_id = self.settings.demo_user_id;
        let session = self.mint(TokenKind::Session)?;
        let refresh = self.mint(TokenKind::Refresh)?;

        let entries = [
            TokenEntry::new(session.token.clone(), user_id, self.settings.session_ttl),
            TokenEntry::new(refresh.token.clone(), user_id, self.settings.refresh_ttl),
        ];
        self.store.set_all(&entries).await.map_err(|e| {
            error!(error = %e, "Error storing session keys");
            AppError::Storage(e)
        })?;

        info!(user_id = %user_id, session = %session.token.redacted(), "User logged in");

        Ok(LoginOutcome::Authenticated { session, refresh })
    }

    /// Mint a new session token from a refresh token
    ///
    /// The refresh token itself is neither rotated nor extended.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: Option<&str>) -> AppResult<IssuedToken> {
        let refresh_token = present(refresh_token).ok_or_else(|| {
            warn!("Refresh cookie not present");
            AppError::MissingToken(TokenKind::Refresh)
        })?;

        let user_id = self.resolve(&refresh_token, TokenKind::Refresh).await?;

        let session = self.mint(TokenKind::Session)?;
        self.store
            .set(&session.token, user_id, self.settings.session_ttl)
            .await
            .map_err(|e| {
                error!(error = %e, "Error storing session key");
                AppError::Storage(e)
            })?;

        info!(user_id = %user_id, session = %session.token.redacted(), "Session refreshed");

        Ok(session)
    }

    /// Resolve the user behind a session token
    ///
    /// Pure read; store state is never modified.
    #[instrument(skip_all)]
    pub async fn authorize(&self, session_token: Option<&str>) -> AppResult<UserId> {
        let session_token = present(session_token).ok_or_else(|| {
            warn!("Session cookie not present");
            AppError::MissingToken(TokenKind::Session)
        })?;

        self.resolve(&session_token, TokenKind::Session).await
    }

    /// Cookie names the caller must expire for the given scope
    ///
    /// Client-side only: the store records stay valid until their TTL lapses.
    pub fn clear(&self, scope: ClearScope) -> Vec<&str> {
        scope
            .kinds()
            .iter()
            .map(|kind| self.settings.cookie_name(*kind))
            .collect()
    }

    fn credentials_match(&self, request: &LoginRequest) -> bool {
        request.email == self.settings.demo_email && request.password == self.settings.demo_password
    }

    /// Look a token up, folding "absent", "expired" and store failures into one
    /// unauthorized outcome
    async fn resolve(&self, token: &Token, kind: TokenKind) -> AppResult<UserId> {
        match self.store.get(token).await {
            Ok(Some(user_id)) => Ok(user_id),
            Ok(None) => {
                warn!(kind = %kind, token = %token.redacted(), "Token not found");
                Err(AppError::InvalidToken(kind))
            }
            Err(e) => {
                warn!(kind = %kind, error = %e, "Error checking token");
                Err(AppError::InvalidToken(kind))
            }
        }
    }

    fn mint(&self, kind: TokenKind) -> AppResult<IssuedToken> {
        Ok(IssuedToken {
            kind,
            token: Token::generate(),
            expires_at: deadline(self.settings.ttl(kind))?,
        })
    }
}

fn present(value: Option<&str>) -> Option<Token> {
    value.filter(|v| !v.is_empty()).map(Token::from)
}

fn deadline(ttl: Duration) -> AppResult<DateTime<Utc>> {
    let ttl = chrono::Duration::from_std(ttl).map_err(AppError::internal)?;
    Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Config(format!("token lifetime {ttl} is out of range")))
}
