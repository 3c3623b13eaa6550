//! API Port - the request dispatcher boundary used by services
//!
//! Services describe a call as an [`ApiRequest`] (method, relative URL, query,
//! body, header overrides) and hand it to an [`ApiPort`]. The production
//! implementation attaches auth headers and retries server errors; tests
//! substitute `MockApiPort` and assert on the descriptor.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Errors surfaced by the API layer.
///
/// The variants follow the failure taxonomy callers care about: no response
/// at all, a response with a status, or a body that doesn't fit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        /// Parsed response body, when the server sent JSON
        detail: Option<Value>,
    },

    /// The response body could not be decoded into the expected type
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Build a status error from a raw response body.
    ///
    /// FastAPI-style `{"detail": "..."}` and `{"message": "..."}` bodies provide
    /// the message; anything else falls back to the body text or a generic line.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body).ok();
        let message = detail
            .as_ref()
            .and_then(|v| {
                v.get("detail")
                    .and_then(Value::as_str)
                    .or_else(|| v.get("message").and_then(Value::as_str))
            })
            .map(str::to_string)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty() && detail.is_none()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        ApiError::Status {
            status,
            message,
            detail,
        }
    }

    /// HTTP status, if the server responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 5xx responses: the only retryable class
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Human-readable message suitable for a notification
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Network(msg) | ApiError::Decode(msg) | ApiError::Encode(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
}

/// Request descriptor. Constructed per call and consumed by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the configured base URL, e.g. `/api/characters`
    pub url: String,
    pub params: Vec<(String, String)>,
    pub body: RequestBody,
    /// Overrides applied on top of the dispatcher's default headers
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a form-encoded body
    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a query parameter by name
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a header override by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The JSON body, if this request carries one
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Object-safe dispatcher boundary.
///
/// Returns the response payload only (no status or envelope). An empty body
/// comes back as `Value::Null`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ApiPort: Send + Sync {
    async fn fetch(&self, request: ApiRequest) -> Result<Value, ApiError>;
}
