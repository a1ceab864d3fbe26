//! reqwest-backed transport
//!
//! Provides the HTTP transport used against a live cluster:
//! - Base URL joining and query parameter encoding
//! - JSON and raw text bodies
//! - Default headers and authentication
//! - Per-request timeout, with no retries and no idle connection pool

use super::transport::{RequestBody, Transport, TransportRequest, TransportResponse};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Base URL of the cluster, e.g. `http://localhost:9200`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Credentials applied to every request
    pub auth: AuthConfig,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9200".to_string(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("solidafy-scroll/{}", env!("CARGO_PKG_VERSION")),
            auth: AuthConfig::None,
        }
    }
}

impl HttpTransportConfig {
    /// Create a new config builder
    pub fn builder() -> HttpTransportConfigBuilder {
        HttpTransportConfigBuilder::default()
    }
}

/// Builder for HTTP transport config
#[derive(Default)]
pub struct HttpTransportConfigBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set authentication
    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.config.auth = auth;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpTransportConfig {
        self.config
    }
}

/// HTTP transport backed by reqwest
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
    authenticator: Authenticator,
}

impl HttpTransport {
    /// Create a transport for the given base URL with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(HttpTransportConfig::builder().base_url(base_url).build())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        // No idle pool: each exchange acquires and releases its own connection.
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .pool_max_idle_per_host(0)
            .build()?;

        let authenticator = Authenticator::new(config.auth.clone());

        Ok(Self {
            client,
            config,
            authenticator,
        })
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: TransportRequest) -> Result<TransportResponse> {
        let full_url = self.build_url(&request.path);
        let method: reqwest::Method = request.method.into();

        let mut req = self.client.request(method.clone(), &full_url);

        // Add default headers
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add query parameters
        if !request.params.is_empty() {
            req = req.query(&request.params);
        }

        // Add body
        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Json(ref body) => req.json(body),
            RequestBody::Text(text) => req
                .header(reqwest::header::CONTENT_TYPE, "text/plain")
                .body(text),
        };

        req = self.authenticator.apply(req);

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if (200..300).contains(&status) {
            debug!("Request succeeded: {} {} -> {}", method, full_url, status);
        } else {
            warn!("Request failed: {} {} -> {}", method, full_url, status);
        }

        Ok(TransportResponse { status, body })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("has_auth", &!self.config.auth.is_none())
            .finish_non_exhaustive()
    }
}
