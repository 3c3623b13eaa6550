//! API dispatch: the configured HTTP client and its typed wrapper.
//!
//! `ApiClient` is the single dispatcher for the remote API. It owns the base
//! URL and default headers, attaches the bearer token from the
//! [`AuthSession`] to every outgoing request, and retries server errors.
//!
//! `Api` wraps an `Arc<dyn ApiPort>` and adds serde conversions so services
//! can work with typed payloads while tests mock the object-safe port.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use quirkverse_player_ports::outbound::{
    ApiError, ApiPort, ApiRequest, HttpRequest, HttpTransport, SleepProvider,
};

use super::retry::RetryConfig;
use super::session::AuthSession;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The configured request dispatcher
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: AuthSession,
    sleeper: Arc<dyn SleepProvider>,
    base_url: String,
    default_headers: Vec<(String, String)>,
    retry: RetryConfig,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: AuthSession,
        sleeper: Arc<dyn SleepProvider>,
        base_url: &str,
        retry: RetryConfig,
    ) -> Self {
        Self {
            transport,
            session,
            sleeper,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: vec![
                ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
                ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
            ],
            retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    /// Build the wire request: defaults, then overrides, then the auth header.
    ///
    /// `Authorization` is only added when the session holds a token.
    fn prepare(&self, request: ApiRequest) -> HttpRequest {
        let mut headers = self.default_headers.clone();
        for (name, value) in request.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        if let Some(token) = self.session.get_token() {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case("Authorization"));
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        HttpRequest {
            method: request.method,
            url: self.resolve_url(&request.url),
            query: request.params,
            headers,
            body: request.body,
        }
    }

    /// One attempt, no retry. Returns the decoded body on a 2xx response.
    pub async fn request(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let http_request = self.prepare(request);
        tracing::debug!(method = %http_request.method, url = %http_request.url, "API request");

        let response = self.transport.execute(http_request).await?;

        if !response.is_success() {
            return Err(ApiError::from_status(response.status, &response.body));
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Dispatch with bounded retry on 5xx responses.
    ///
    /// Client errors, network failures and the last server error are returned
    /// unchanged.
    pub async fn fetch_with_retry(
        &self,
        request: ApiRequest,
        max_attempts: u32,
    ) -> Result<Value, ApiError> {
        let max_attempts = max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.request(request.clone()).await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(
                            attempt,
                            url = %request.url,
                            "API request succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(error) if error.is_server_error() && attempt < max_attempts => {
                    let delay_ms = self.retry.delay_for(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms,
                        error = %error,
                        url = %request.url,
                        "Server error, retrying"
                    );
                    self.sleeper.sleep_ms(delay_ms).await;
                    attempt += 1;
                }
                Err(error) => {
                    if error.is_server_error() {
                        tracing::error!(
                            attempts = attempt,
                            error = %error,
                            url = %request.url,
                            "API request failed after all retry attempts"
                        );
                    } else {
                        tracing::debug!(error = %error, url = %request.url, "API request failed");
                    }
                    return Err(error);
                }
            }
        }
    }
}

#[async_trait]
impl ApiPort for ApiClient {
    async fn fetch(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.fetch_with_retry(request, self.retry.max_attempts).await
    }
}

/// Typed facade over an object-safe [`ApiPort`]
#[derive(Clone)]
pub struct Api {
    raw: Arc<dyn ApiPort>,
}

impl Api {
    pub fn new(raw: Arc<dyn ApiPort>) -> Self {
        Self { raw }
    }

    /// Dispatch and decode the payload as `T`
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let value = self.raw.fetch(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Dispatch and discard the payload (e.g. `204 No Content`)
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.raw.fetch(request).await.map(|_| ())
    }
}
