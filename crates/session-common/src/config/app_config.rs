//! Application configuration structs
//!
//! Loads configuration from environment variables.
//! Every setting has a default so the server starts with no environment at all.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub redis: RedisConfig,
    pub session: SessionConfig,
    pub demo: DemoAccountConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub static_dir: String,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Which key-value store backs the tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Redis,
    /// In-process map, for local runs and tests
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}', expected redis or memory")),
        }
    }
}

/// Token store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Namespace prepended to every token key (empty means raw token keys)
    pub key_prefix: String,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Cookie names and token lifetimes
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub session_cookie: String,
    pub refresh_cookie: String,
    pub session_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

impl SessionConfig {
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    #[must_use]
    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_ttl_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_cookie: default_session_cookie(),
            refresh_cookie: default_refresh_cookie(),
            session_ttl_secs: default_session_ttl_secs(),
            refresh_ttl_secs: default_refresh_ttl_secs(),
        }
    }
}

/// The single accepted login and the user id it resolves to
#[derive(Debug, Clone)]
pub struct DemoAccountConfig {
    pub email: String,
    pub password: String,
    pub user_id: i64,
}

impl Default for DemoAccountConfig {
    fn default() -> Self {
        Self {
            email: default_demo_credential(),
            password: default_demo_credential(),
            user_id: default_demo_user_id(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "cookie-session".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_static_dir() -> String {
    "./public".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6666".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_session_cookie() -> String {
    "session".to_string()
}

fn default_refresh_cookie() -> String {
    "refresh".to_string()
}

fn default_session_ttl_secs() -> u64 {
    3600 // 1 hour
}

fn default_refresh_ttl_secs() -> u64 {
    86400 // 24 hours
}

fn default_demo_credential() -> String {
    "demo".to_string()
}

fn default_demo_user_id() -> i64 {
    1
}

impl AppConfig {
    /// Load configuration from process environment variables
    ///
    /// A `.env` file, if any, must already have been applied by the caller.
    ///
    /// # Errors
    /// Returns an error if a variable is present but malformed, or the values are inconsistent
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: fn() -> String| lookup(key).unwrap_or_else(default);

        let config = Self {
            app: AppSettings {
                name: string_or("APP_NAME", default_app_name),
                env: parse_or(&lookup, "APP_ENV", default_env)?,
            },
            server: ServerConfig {
                host: string_or("SERVER_HOST", default_host),
                port: parse_or(&lookup, "SERVER_PORT", default_port)?,
                request_timeout_secs: parse_or(
                    &lookup,
                    "REQUEST_TIMEOUT_SECS",
                    default_request_timeout_secs,
                )?,
                static_dir: string_or("STATIC_DIR", default_static_dir),
            },
            store: StoreConfig {
                backend: parse_or(&lookup, "STORE_BACKEND", StoreBackend::default)?,
                key_prefix: lookup("REDIS_KEY_PREFIX").unwrap_or_default(),
            },
            redis: RedisConfig {
                url: string_or("REDIS_URL", default_redis_url),
                max_connections: parse_or(
                    &lookup,
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections,
                )?,
            },
            session: SessionConfig {
                session_cookie: string_or("SESSION_COOKIE_NAME", default_session_cookie),
                refresh_cookie: string_or("REFRESH_COOKIE_NAME", default_refresh_cookie),
                session_ttl_secs: parse_or(&lookup, "SESSION_TTL_SECS", default_session_ttl_secs)?,
                refresh_ttl_secs: parse_or(&lookup, "REFRESH_TTL_SECS", default_refresh_ttl_secs)?,
            },
            demo: DemoAccountConfig {
                email: string_or("DEMO_EMAIL", default_demo_credential),
                password: string_or("DEMO_PASSWORD", default_demo_credential),
                user_id: parse_or(&lookup, "DEMO_USER_ID", default_demo_user_id)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let session = &self.session;
        if session.session_cookie.trim().is_empty() {
            return Err(ConfigError::InvalidValue("SESSION_COOKIE_NAME", "must not be empty".into()));
        }
        if session.refresh_cookie.trim().is_empty() {
            return Err(ConfigError::InvalidValue("REFRESH_COOKIE_NAME", "must not be empty".into()));
        }
        if session.session_cookie == session.refresh_cookie {
            return Err(ConfigError::InvalidValue(
                "REFRESH_COOKIE_NAME",
                "must differ from SESSION_COOKIE_NAME".into(),
            ));
        }
        check_ttl("SESSION_TTL_SECS", session.session_ttl_secs)?;
        check_ttl("REFRESH_TTL_SECS", session.refresh_ttl_secs)?;
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS", "must be positive".into()));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout_secs(),
                static_dir: default_static_dir(),
            },
            store: StoreConfig {
                backend: StoreBackend::default(),
                key_prefix: String::new(),
            },
            redis: RedisConfig {
                url: default_redis_url(),
                max_connections: default_redis_max_connections(),
            },
            session: SessionConfig::default(),
            demo: DemoAccountConfig::default(),
        }
    }
}

/// Longest accepted token lifetime (one year)
pub const MAX_TTL_SECS: u64 = 365 * 24 * 3600;

fn check_ttl(key: &'static str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue(key, "must be positive".into()));
    }
    if secs > MAX_TTL_SECS {
        return Err(ConfigError::InvalidValue(
            key,
            format!("must be at most {MAX_TTL_SECS} seconds"),
        ));
    }
    Ok(())
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(key, e.to_string())),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
