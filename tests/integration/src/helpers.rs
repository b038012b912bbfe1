//! Test helpers for integration tests
//!
//! Provides a spawned test server plus small assertion helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use session_api::{create_app, create_app_state, create_app_state_with_store};
use session_cache::MemoryTokenStore;
use session_common::{AppConfig, StoreBackend};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::SetCookie;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Backing store when running on the memory backend
    pub store: Option<MemoryTokenStore>,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    /// Start a server on the in-memory backend
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a server on the in-memory backend with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let store = MemoryTokenStore::new();
        let state = create_app_state_with_store(config, Arc::new(store.clone()));
        Self::spawn(create_app(state), Some(store)).await
    }

    /// Start a server against the Redis at `REDIS_URL`
    pub async fn start_redis(url: String) -> Result<Self> {
        let mut config = test_config();
        config.store.backend = StoreBackend::Redis;
        config.store.key_prefix = "integration-test:".to_string();
        config.redis.url = url;

        let state = create_app_state(config).await?;
        Self::spawn(create_app(state), None).await
    }

    async fn spawn(app: axum::Router, store: Option<MemoryTokenStore>) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Cookies are handled by hand so Secure cookies survive plain http
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            handle,
        })
    }

    /// The memory store, for tests that inspect or tamper with token records
    pub fn memory_store(&self) -> &MemoryTokenStore {
        self.store
            .as_ref()
            .expect("test server was started on the memory backend")
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.get_with_cookies(path, &[]).await
    }

    /// Make a GET request carrying the given cookies
    pub async fn get_with_cookies(&self, path: &str, cookies: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        let mut request = self.client.get(&url);
        if let Some(cookie) = cookie_header(cookies) {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        self.post_with_cookies(path, body, &[]).await
    }

    /// Make a POST request with JSON body and cookies
    pub async fn post_with_cookies<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        cookies: &[(&str, &str)],
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        let mut request = self.client.post(&url).json(body);
        if let Some(cookie) = cookie_header(cookies) {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }

    /// Make a POST request with a raw body
    pub async fn post_raw(&self, path: &str, content_type: &str, body: &'static str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?)
    }

    /// Make a body-less POST request carrying the given cookies
    pub async fn post_empty_with_cookies(&self, path: &str, cookies: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        let mut request = self.client.post(&url);
        if let Some(cookie) = cookie_header(cookies) {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }
}

/// Create a test configuration on the memory backend
///
/// Starts from defaults rather than the environment so a developer's `.env`
/// does not leak into tests.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.store.backend = StoreBackend::Memory;
    config.server.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../public").to_string();
    config
}

/// `REDIS_URL` if Redis-backed tests should run
pub fn redis_url() -> Option<String> {
    match std::env::var("REDIS_URL") {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: REDIS_URL not set");
            None
        }
    }
}

fn cookie_header(cookies: &[(&str, &str)]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

/// Every `Set-Cookie` header on a response
pub fn set_cookies(response: &Response) -> Vec<SetCookie> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(SetCookie::parse)
        .collect()
}

/// The `Set-Cookie` for `name`, if any
pub fn set_cookie(response: &Response, name: &str) -> Option<SetCookie> {
    set_cookies(response).into_iter().find(|c| c.name == name)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status and return the plain-text body
pub async fn assert_text(response: Response, expected_status: StatusCode) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(body)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    assert_text(response, expected_status).await.map(|_| ())
}
