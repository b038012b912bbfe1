//! Session cookie construction
//!
//! Every cookie this service sets is `HttpOnly`, `Secure`, `SameSite=Strict`
//! and scoped to `/`. Removal cookies repeat those attributes so browsers match
//! them against the original.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use session_service::IssuedToken;
use time::OffsetDateTime;

use crate::response::{ApiError, ApiResult};

fn base(name: &str, value: String) -> Cookie<'static> {
    Cookie::build((name.to_owned(), value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/")
        .build()
}

/// Cookie carrying a freshly issued token, expiring at the token's deadline
pub fn token_cookie(name: &str, issued: &IssuedToken) -> ApiResult<Cookie<'static>> {
    let expires = OffsetDateTime::from_unix_timestamp(issued.expires_at.timestamp())
        .map_err(ApiError::internal)?;

    let mut cookie = base(name, issued.token.as_str().to_owned());
    cookie.set_expires(expires);
    Ok(cookie)
}

/// Cookie instructing the client to drop `name` immediately
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = base(name, String::new());
    cookie.make_removal();
    cookie
}

/// Add removal cookies for every name, whether or not the client sent it
pub fn expire_all<'a>(jar: CookieJar, names: impl IntoIterator<Item = &'a str>) -> CookieJar {
    names
        .into_iter()
        .fold(jar, |jar, name| jar.add(removal_cookie(name)))
}

/// Value of a cookie, if present in the request
pub fn value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(|cookie| cookie.value())
}
