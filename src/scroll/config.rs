//! Scan configuration
//!
//! A [`ScanConfig`] is assembled once through [`ScanConfigBuilder`] (or
//! deserialized from YAML/JSON) and validated on the way in. It cannot be
//! changed afterwards and is consumed by [`ScrollClient::scan`](super::ScrollClient::scan).

use crate::error::{Error, Result};
use crate::types::JsonValue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Keep-alive used when none is configured, for initiation and every continuation
pub const DEFAULT_KEEP_ALIVE: &str = "5m";

static KEEP_ALIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*(nanos|micros|ms|s|m|h|d)$").unwrap());

fn default_query() -> Option<JsonValue> {
    Some(serde_json::json!({ "match_all": {} }))
}

// ============================================================================
// Definition (unvalidated)
// ============================================================================

/// Unvalidated scan definition, as written in a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfigDef {
    /// Index names, in order
    #[serde(default)]
    pub indices: Vec<String>,

    /// Type names, in order
    #[serde(default, alias = "doc_types")]
    pub types: Vec<String>,

    /// Query object; `null` sends no query at all
    #[serde(default = "default_query")]
    pub query: Option<JsonValue>,

    /// Scroll context keep-alive, e.g. "5m"; empty or absent means the default
    #[serde(default, alias = "scroll")]
    pub keep_alive: Option<String>,

    /// Page size hint, only sent when positive
    #[serde(default)]
    pub size: Option<u32>,

    /// Ask the server for indented JSON
    #[serde(default)]
    pub pretty: bool,

    /// Log full requests and responses
    #[serde(default)]
    pub debug: bool,
}

impl Default for ScanConfigDef {
    fn default() -> Self {
        Self {
            indices: Vec::new(),
            types: Vec::new(),
            query: default_query(),
            keep_alive: None,
            size: None,
            pretty: false,
            debug: false,
        }
    }
}

impl ScanConfigDef {
    fn validate(&self) -> Result<()> {
        if self.indices.iter().any(String::is_empty) {
            return Err(Error::invalid_value("indices", "index names must not be empty"));
        }
        if self.types.iter().any(String::is_empty) {
            return Err(Error::invalid_value("types", "type names must not be empty"));
        }
        if let Some(keep_alive) = &self.keep_alive {
            if !KEEP_ALIVE_RE.is_match(keep_alive) {
                return Err(Error::invalid_value(
                    "keep_alive",
                    format!("'{keep_alive}' is not a duration like 30s, 5m or 1h"),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Validated config
// ============================================================================

/// Validated, immutable scan configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScanConfigDef", into = "ScanConfigDef")]
pub struct ScanConfig {
    def: ScanConfigDef,
}

impl TryFrom<ScanConfigDef> for ScanConfig {
    type Error = Error;

    fn try_from(mut def: ScanConfigDef) -> Result<Self> {
        // An empty keep-alive means unset
        if def.keep_alive.as_deref() == Some("") {
            def.keep_alive = None;
        }
        def.validate()?;
        Ok(Self { def })
    }
}

impl From<ScanConfig> for ScanConfigDef {
    fn from(config: ScanConfig) -> Self {
        config.def
    }
}

impl ScanConfig {
    /// Create a new config builder
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Load from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let def: ScanConfigDef = serde_yaml::from_str(yaml)?;
        Self::try_from(def)
    }

    /// Load from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let def: ScanConfigDef = serde_json::from_str(json)?;
        Self::try_from(def)
    }

    /// Index names, in the order they were added
    pub fn indices(&self) -> &[String] {
        &self.def.indices
    }

    /// Type names, in the order they were added
    pub fn types(&self) -> &[String] {
        &self.def.types
    }

    /// The query, `None` when cleared
    pub fn query(&self) -> Option<&JsonValue> {
        self.def.query.as_ref()
    }

    /// Effective keep-alive, falling back to [`DEFAULT_KEEP_ALIVE`]
    pub fn keep_alive(&self) -> &str {
        self.def.keep_alive.as_deref().unwrap_or(DEFAULT_KEEP_ALIVE)
    }

    /// Keep-alive exactly as configured
    pub fn keep_alive_override(&self) -> Option<&str> {
        self.def.keep_alive.as_deref()
    }

    /// Page size hint
    pub fn size(&self) -> Option<u32> {
        self.def.size
    }

    pub fn pretty(&self) -> bool {
        self.def.pretty
    }

    pub fn debug(&self) -> bool {
        self.def.debug
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ScanConfig`]
///
/// Names accumulate in call order; adding them one at a time or in batches
/// gives the same result.
#[derive(Debug, Clone, Default)]
pub struct ScanConfigBuilder {
    def: ScanConfigDef,
}

impl ScanConfigBuilder {
    /// Add an index
    #[must_use]
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.def.indices.push(index.into());
        self
    }

    /// Add several indices
    #[must_use]
    pub fn indices<I, S>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.def.indices.extend(indices.into_iter().map(Into::into));
        self
    }

    /// Add a type
    #[must_use]
    pub fn doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.def.types.push(doc_type.into());
        self
    }

    /// Add several types
    #[must_use]
    pub fn doc_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.def.types.extend(types.into_iter().map(Into::into));
        self
    }

    /// Set the query
    #[must_use]
    pub fn query(mut self, query: JsonValue) -> Self {
        self.def.query = Some(query);
        self
    }

    /// Send no query; the request body becomes `{}`
    #[must_use]
    pub fn clear_query(mut self) -> Self {
        self.def.query = None;
        self
    }

    /// Set how long the server keeps the scroll context alive between steps
    #[must_use]
    pub fn keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.def.keep_alive = Some(keep_alive.into());
        self
    }

    /// Alias for [`keep_alive`](Self::keep_alive)
    #[must_use]
    pub fn scroll(self, keep_alive: impl Into<String>) -> Self {
        self.keep_alive(keep_alive)
    }

    /// Set the page size hint
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.def.size = Some(size);
        self
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.def.pretty = pretty;
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.def.debug = debug;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ScanConfig> {
        ScanConfig::try_from(self.def)
    }
}
