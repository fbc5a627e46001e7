//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting caller tokens,
//! and making HTTP requests.

use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Result;
use channel_api::{create_app, create_app_state};
use channel_common::{AppConfig, JwtService};
use channel_core::{Snowflake, SnowflakeGenerator};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Worker id reserved for ids minted by the tests
const TEST_WORKER_ID: u16 = 1023;

/// Shared generator so ids stay unique across tests in one process
pub fn next_id() -> Snowflake {
    static GENERATOR: OnceLock<SnowflakeGenerator> = OnceLock::new();
    GENERATOR
        .get_or_init(|| SnowflakeGenerator::new(TEST_WORKER_ID))
        .generate()
}

/// A caller identity with a signed access token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Snowflake,
    pub token: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let jwt = JwtService::from_config(&config.jwt);

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    /// Mint a fresh caller
    pub fn user(&self) -> Result<TestUser> {
        let id = next_id();
        let token = self.jwt.issue_access_token(id)?;
        Ok(TestUser { id, token })
    }

    /// Make an unauthenticated GET request against a root path
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    async fn send(request: RequestBuilder, user: &TestUser) -> Result<Response> {
        Ok(request.bearer_auth(&user.token).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, user: &TestUser) -> Result<Response> {
        Self::send(self.client.get(self.url(path)), user).await
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(&self, path: &str, user: &TestUser, body: &T) -> Result<Response> {
        Self::send(self.client.post(self.url(path)).json(body), user).await
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(&self, path: &str, user: &TestUser, body: &T) -> Result<Response> {
        Self::send(self.client.patch(self.url(path)).json(body), user).await
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(&self, path: &str, user: &TestUser, body: &T) -> Result<Response> {
        Self::send(self.client.put(self.url(path)).json(body), user).await
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, user: &TestUser) -> Result<Response> {
        Self::send(self.client.delete(self.url(path)), user).await
    }
}

/// Create a test configuration
///
/// Rate limits are raised so a test run never trips the global bucket.
pub fn test_config() -> Result<AppConfig> {
    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    config.rate_limit.requests_per_second = 1_000;
    config.rate_limit.burst = 10_000;
    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    for key in ["DATABASE_URL", "JWT_SECRET"] {
        if std::env::var(key).is_err() {
            eprintln!("Skipping test: {key} not set");
            return false;
        }
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
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

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
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
    Ok(())
}

/// Assert an error response and return its code
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Missing error code in {body}"))
}
