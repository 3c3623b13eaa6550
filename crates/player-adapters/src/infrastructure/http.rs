//! HTTP transport over reqwest
//!
//! One request in, one response out. Status handling, auth headers and retry
//! live in the application's `ApiClient`; this adapter only moves bytes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use quirkverse_player_ports::outbound::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody,
};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TIMEOUT))
    }
}

impl ReqwestTransport {
    /// `None` disables the timeout
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });

        Self { client }
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .client
            .request(to_method(request.method), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes =
                    serde_json::to_vec(&value).map_err(|e| ApiError::Encode(e.to_string()))?;
                builder.body(bytes)
            }
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(url = %request.url, "Request timed out");
            }
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;

        tracing::trace!(method = %request.method, url = %request.url, status, "HTTP exchange");
        Ok(HttpResponse::new(status, body))
    }
}
