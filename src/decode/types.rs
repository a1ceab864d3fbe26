//! Result page types

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Deserializer, Serialize};

/// One decoded search or scroll response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Token for continuing past this page
    #[serde(rename = "_scroll_id", default, skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,

    /// Server-side time spent, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,

    /// Whether the search timed out on some shards
    #[serde(default)]
    pub timed_out: bool,

    /// Shard statistics
    #[serde(rename = "_shards", default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<ShardsInfo>,

    /// Hit metadata and documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<SearchHits>,
}

impl ResultPage {
    /// Decode a response body and check it for contradictions
    pub fn decode(body: &str) -> Result<Self> {
        let page: ResultPage = serde_json::from_str(body)?;
        page.validate()?;
        Ok(page)
    }

    /// Reject a page that reports zero total hits yet carries documents
    pub fn validate(&self) -> Result<()> {
        if let Some(hits) = &self.hits {
            if hits.total == 0 && !hits.hits.is_empty() {
                return Err(Error::InconsistentPage {
                    total: hits.total,
                    returned: hits.hits.len(),
                });
            }
        }
        Ok(())
    }

    /// A page with no hits object, no documents, or a zero total ends the scroll
    pub fn is_terminal(&self) -> bool {
        match &self.hits {
            None => true,
            Some(hits) => hits.hits.is_empty() || hits.total == 0,
        }
    }

    /// Total hits for the whole scroll, 0 if the page has no hit metadata
    pub fn total_hits(&self) -> u64 {
        self.hits.as_ref().map_or(0, |h| h.total)
    }

    /// Documents on this page
    pub fn documents(&self) -> &[SearchHit] {
        self.hits
            .as_ref()
            .map(|h| h.hits.as_slice())
            .unwrap_or_default()
    }

    /// Number of documents on this page
    pub fn len(&self) -> usize {
        self.documents().len()
    }

    /// Check if the page carries no documents
    pub fn is_empty(&self) -> bool {
        self.documents().is_empty()
    }

    /// The scroll id, if present and non-empty
    pub fn scroll_id(&self) -> Option<&str> {
        self.scroll_id.as_deref().filter(|s| !s.is_empty())
    }
}

/// The `hits` object of a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHits {
    /// Total matches for the whole query
    #[serde(default, deserialize_with = "deserialize_total")]
    pub total: u64,

    /// Best score on this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,

    /// Matched documents, in server order
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// A single matched document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<JsonObject>,
}

/// The `_shards` object of a response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardsInfo {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub successful: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub failed: u32,
}

/// `hits.total` is a bare integer on older clusters and
/// `{"value": n, "relation": "eq"}` on newer ones
fn deserialize_total<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Total {
        Count(u64),
        Object { value: u64 },
    }

    Ok(match Total::deserialize(deserializer)? {
        Total::Count(n) | Total::Object { value: n } => n,
    })
}
