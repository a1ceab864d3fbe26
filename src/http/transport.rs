//! The transport seam
//!
//! The scroll protocol only needs "send this method, path, params and body;
//! give me the status and body back". Anything that can do that implements
//! [`Transport`], which keeps the cursor testable without a network.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Method, QueryParams};
use async_trait::async_trait;

/// Body of an outgoing request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document, sent as `application/json`
    Json(JsonValue),
    /// Raw text, sent as `text/plain` without any envelope
    Text(String),
}

/// A single request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the transport's base URL, already escaped
    pub path: String,
    /// Query string parameters
    pub params: QueryParams,
    /// Request body
    pub body: RequestBody,
}

impl TransportRequest {
    /// Create a new request with no params and no body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::new(),
            body: RequestBody::Empty,
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set raw text body
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = RequestBody::Text(body.into());
        self
    }

    /// Path plus encoded query string, for logging
    pub fn target(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// Response returned by a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Create a new response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange
///
/// Implementations must not retry: every failure is handed back to the
/// caller unchanged. A non-2xx status is a successful exchange at this
/// layer; use [`check_response`] to turn it into an error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response
    async fn perform(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Turn a non-2xx response into [`Error::HttpStatus`]
pub fn check_response(response: TransportResponse) -> Result<TransportResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(Error::http_status(response.status, response.body))
    }
}
