//! Authenticator implementation
//!
//! Applies the configured credentials to outgoing requests.

use super::types::AuthConfig;
use base64::Engine;
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),
            AuthConfig::ApiKey { id, api_key } => {
                req.header("Authorization", format!("ApiKey {}", encode_api_key(id, api_key)))
            }
            AuthConfig::Bearer { token } => req.bearer_auth(token),
        }
    }
}

/// Encode an API key pair the way the cluster expects it
fn encode_api_key(id: &str, api_key: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{id}:{api_key}"))
}
