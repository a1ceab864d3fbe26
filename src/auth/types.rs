//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Authentication configuration
///
/// Deserializes from a tagged map, e.g. in YAML:
///
/// ```yaml
/// auth:
///   type: basic
///   username: elastic
///   password: changeme
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// API key authentication, sent as `Authorization: ApiKey base64(id:api_key)`
    ApiKey {
        /// Key id
        id: String,
        /// Key secret
        api_key: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Create a basic auth config
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create an API key auth config
    pub fn api_key(id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::ApiKey {
            id: id.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a bearer auth config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Check if this config adds credentials to requests
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
