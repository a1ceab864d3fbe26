//! Error types for Solidafy Scroll
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! End-of-stream is deliberately absent: it is a normal outcome of
//! [`ScrollCursor::next`](crate::scroll::ScrollCursor::next) and is carried by
//! [`ScrollStep::EndOfStream`](crate::scroll::ScrollStep::EndOfStream).

use thiserror::Error;

/// The main error type for Solidafy Scroll
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Decode Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Inconsistent page: total hits is {total} but {returned} documents were returned")]
    InconsistentPage { total: u64, returned: usize },

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    #[error("No scroll id to continue from")]
    MissingScrollId,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// The call could not be completed or the server answered with an error status
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. } | Error::InvalidUrl(_)
        )
    }

    /// A response body or config document did not have the expected shape
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::JsonParse(_) | Error::YamlParse(_) | Error::InconsistentPage { .. }
        )
    }

    /// The cursor was asked to continue without a scroll id
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::MissingScrollId)
    }

    /// Check if this error is retryable
    ///
    /// Nothing in this crate retries; this is a hint for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for Solidafy Scroll
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_value("keep_alive", "bad");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'keep_alive': bad"
        );

        let err = Error::missing_field("base_url");
        assert_eq!(err.to_string(), "Missing required config field: base_url");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::InconsistentPage {
            total: 0,
            returned: 3,
        };
        assert_eq!(
            err.to_string(),
            "Inconsistent page: total hits is 0 but 3 documents were returned"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(500, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::http_status(404, "").is_retryable());
        assert!(!Error::MissingScrollId.is_retryable());
        assert!(!Error::missing_field("base_url").is_retryable());
    }

    #[test]
    fn test_taxonomy_is_disjoint() {
        let transport = Error::http_status(502, "bad gateway");
        assert!(transport.is_transport());
        assert!(!transport.is_decode());
        assert!(!transport.is_protocol());

        let decode = Error::from(serde_json::from_str::<u32>("nope").unwrap_err());
        assert!(decode.is_decode());
        assert!(!decode.is_transport());

        let protocol = Error::MissingScrollId;
        assert!(protocol.is_protocol());
        assert!(!protocol.is_transport());
        assert!(!protocol.is_decode());
    }
}
