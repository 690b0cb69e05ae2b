//! Backend REST API Client
//!
//! HTTP client for the login, register and positions endpoints.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::dto::{Credentials, ErrorBody, LoginResponse, Position, PositionInput, PositionList};
use super::error::{ApiError, ApiResult};
use super::{AuthApi, PositionsApi};

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Value sent in the `User-Agent` header
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 10_000,
            user_agent: format!("portal/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Backend REST API client
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer token for the positions endpoints
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> ApiResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ApiError::Unauthenticated)?;
        Ok(builder.bearer_auth(token))
    }

    /// Send one request; no retry.
    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let request_id = uuid::Uuid::new_v4().to_string();
        builder
            .header("X-Request-Id", &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "request failed");
                ApiError::from_transport(e)
            })
    }

    /// Turn a non-2xx response into `ApiError::Api`, preferring the
    /// backend's `message` over `fallback`. A body that is present but not
    /// JSON (a proxy error page, say) is `InvalidResponse`.
    async fn check(response: Response, fallback: &str) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %text, "backend rejected request");

        let body = if text.trim().is_empty() {
            None
        } else {
            let value = serde_json::from_str::<serde_json::Value>(&text).map_err(|e| {
                ApiError::InvalidResponse(format!("status {}: {}", status.as_u16(), e))
            })?;
            serde_json::from_value::<ErrorBody>(value).ok()
        };

        let message = body
            .and_then(|body| body.text())
            .unwrap_or_else(|| fallback.to_string());

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let text = response.text().await.map_err(ApiError::from_transport)?;
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        let url = self.url("/login");
        tracing::debug!(url = %url, username = %credentials.username, "logging in");

        let response = self.send(self.client.post(&url).json(credentials)).await?;
        let response = Self::check(response, "Login failed").await?;
        let body: LoginResponse = Self::json(response).await?;

        Ok(body.access_token)
    }

    async fn register(&self, credentials: &Credentials) -> ApiResult<()> {
        let url = self.url("/register");
        tracing::debug!(url = %url, username = %credentials.username, "registering");

        let response = self.send(self.client.post(&url).json(credentials)).await?;
        Self::check(response, "Register failed").await?;
        Ok(())
    }
}

#[async_trait]
impl PositionsApi for ApiClient {
    async fn list_positions(&self) -> ApiResult<Vec<Position>> {
        let url = self.url("/positions");
        tracing::debug!(url = %url, "fetching positions");

        let builder = self.authorized(self.client.get(&url))?;
        let response = self.send(builder).await?;
        let response = Self::check(response, "Failed to load positions").await?;
        let list: PositionList = Self::json(response).await?;

        Ok(list.into_vec())
    }

    async fn create_position(&self, input: &PositionInput) -> ApiResult<()> {
        let url = self.url("/positions");
        tracing::debug!(url = %url, code = %input.position_code, "creating position");

        let builder = self.authorized(self.client.post(&url).json(input))?;
        let response = self.send(builder).await?;
        Self::check(response, "Failed to create position").await?;
        Ok(())
    }

    async fn update_position(&self, id: i64, input: &PositionInput) -> ApiResult<()> {
        let url = self.url(&format!("/positions/{}", id));
        tracing::debug!(url = %url, code = %input.position_code, "updating position");

        let builder = self.authorized(self.client.put(&url).json(input))?;
        let response = self.send(builder).await?;
        Self::check(response, "Failed to update position").await?;
        Ok(())
    }

    async fn delete_position(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&format!("/positions/{}", id));
        tracing::debug!(url = %url, "deleting position");

        let builder = self.authorized(self.client.delete(&url))?;
        let response = self.send(builder).await?;
        Self::check(response, "Failed to delete position").await?;
        Ok(())
    }
}
