//! Scroll initiation
//!
//! Opens a scan/scroll context on the server and hands back a
//! [`ScrollCursor`] seeded with the first response.

use super::config::ScanConfig;
use super::cursor::ScrollCursor;
use crate::decode::ResultPage;
use crate::error::Result;
use crate::http::{check_response, HttpTransport, HttpTransportConfig, Transport, TransportRequest};
use crate::types::{JsonObject, JsonValue, Method};
use std::sync::Arc;
use tracing::debug;

/// Entry point for scans against one cluster
#[derive(Clone)]
pub struct ScrollClient {
    transport: Arc<dyn Transport>,
}

impl ScrollClient {
    /// Create a client over any transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client over a shared transport
    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client backed by [`HttpTransport`]
    pub fn connect(config: HttpTransportConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::with_config(config)?))
    }

    /// Open a scroll context and return a cursor positioned before the first page
    ///
    /// The initiation response is not assumed to carry documents. Under scan
    /// semantics it only reports the total and the first scroll id; documents
    /// arrive through [`ScrollCursor::next`].
    pub async fn scan(&self, config: ScanConfig) -> Result<ScrollCursor> {
        let request = initiation_request(&config);
        let page = exchange(self.transport.as_ref(), request, config.debug()).await?;

        debug!(
            "Scan opened on {:?}: {} total hits",
            config.indices(),
            page.total_hits()
        );

        Ok(ScrollCursor::new(Arc::clone(&self.transport), page)
            .with_keep_alive(config.keep_alive())
            .with_pretty(config.pretty())
            .with_debug(config.debug()))
    }
}

impl std::fmt::Debug for ScrollClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollClient").finish_non_exhaustive()
    }
}

/// Build the request that opens a scroll context
pub fn initiation_request(config: &ScanConfig) -> TransportRequest {
    let mut request = TransportRequest::new(
        Method::POST,
        search_path(config.indices(), config.types()),
    )
    .param("search_type", "scan")
    .param("scroll", config.keep_alive());

    if config.pretty() {
        request = request.param("pretty", "true");
    }
    if let Some(size) = config.size().filter(|&n| n > 0) {
        request = request.param("size", size.to_string());
    }

    let mut body = JsonObject::new();
    if let Some(query) = config.query() {
        body.insert("query".to_string(), query.clone());
    }
    request.json(JsonValue::Object(body))
}

/// `/<indices>/<types>/_search`, leaving out whichever list is empty
pub fn search_path(indices: &[String], types: &[String]) -> String {
    let mut segments = Vec::with_capacity(3);
    if !indices.is_empty() {
        segments.push(join_escaped(indices));
    }
    if !types.is_empty() {
        segments.push(join_escaped(types));
    }
    segments.push("_search".to_string());
    format!("/{}", segments.join("/"))
}

fn join_escaped(names: &[String]) -> String {
    names
        .iter()
        .map(|name| escape_path_segment(name))
        .collect::<Vec<_>>()
        .join(",")
}

/// Percent-encode a name for use inside a single path segment
pub fn escape_path_segment(name: &str) -> String {
    // form encoding writes spaces as '+' and escapes a literal '+' as %2B
    url::form_urlencoded::byte_serialize(name.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Send one request and decode the result page
pub(super) async fn exchange(
    transport: &dyn Transport,
    request: TransportRequest,
    verbose: bool,
) -> Result<ResultPage> {
    if verbose {
        debug!(
            "{} {} body={:?}",
            request.method,
            request.target(),
            request.body
        );
    }

    let response = transport.perform(request).await?;

    if verbose {
        debug!("HTTP {} body={}", response.status, response.body);
    }

    let response = check_response(response)?;
    ResultPage::decode(&response.body)
}
