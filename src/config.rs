//! Client configuration
//!
//! Describes how to reach a cluster. Loaded from YAML or JSON (picked by file
//! extension) and turned into an [`HttpTransportConfig`].
//!
//! ```yaml
//! base_url: https://search.internal:9200
//! timeout_secs: 60
//! headers:
//!   X-Opaque-Id: nightly-export
//! auth:
//!   type: basic
//!   username: elastic
//!   password: changeme
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::HttpTransportConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

fn default_base_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Connection settings for a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the cluster
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Override the user agent
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Authentication
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
            user_agent: None,
            auth: AuthConfig::None,
        }
    }
}

impl ClientConfig {
    /// Load from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Check the config for values the transport cannot use
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }
        Ok(())
    }

    /// Convert into the runtime transport config
    pub fn transport_config(&self) -> HttpTransportConfig {
        let mut builder = HttpTransportConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .auth(self.auth.clone());

        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}
