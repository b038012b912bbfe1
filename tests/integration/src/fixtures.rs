//! Test fixtures
//!
//! Request bodies and parsed response pieces shared by the integration tests.

use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// The credentials the server accepts by default
    pub fn demo() -> Self {
        Self::new("demo", "demo")
    }

    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// Error envelope returned on every failure
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// One `Set-Cookie` header, split into name, value and raw attributes
#[derive(Debug, Clone)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub attributes: Vec<String>,
}

impl SetCookie {
    /// Parse a raw `Set-Cookie` header value
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(';').map(str::trim);
        let (name, value) = parts.next()?.split_once('=')?;
        Some(Self {
            name: name.to_string(),
            value: value.to_string(),
            attributes: parts.map(str::to_string).collect(),
        })
    }

    /// Whether a flag or `key=value` attribute is present (key match is case-insensitive)
    pub fn has(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a.eq_ignore_ascii_case(attribute))
    }

    /// Value of a `key=value` attribute
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find_map(|a| {
            let (k, v) = a.split_once('=')?;
            k.eq_ignore_ascii_case(key).then_some(v)
        })
    }

    /// A cleared cookie carries no value and a zero max age
    pub fn is_removal(&self) -> bool {
        self.value.is_empty() && self.attribute("Max-Age") == Some("0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_cookie() {
        let cookie = SetCookie::parse(
            "session=abc; HttpOnly; SameSite=Strict; Secure; Path=/; Expires=Wed, 01 Jan 2031 00:00:00 GMT",
        )
        .unwrap();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc");
        assert!(cookie.has("HttpOnly"));
        assert!(cookie.has("Secure"));
        assert_eq!(cookie.attribute("SameSite"), Some("Strict"));
        assert_eq!(cookie.attribute("Path"), Some("/"));
        assert!(!cookie.is_removal());
    }

    #[test]
    fn test_parse_removal() {
        let cookie = SetCookie::parse("refresh=; Path=/; Max-Age=0").unwrap();
        assert!(cookie.is_removal());
    }
}
