//! Scroll cursor
//!
//! The cursor holds the most recent page and the scroll id it carries, and
//! steps through the remaining pages one continuation request at a time.
//!
//! ```text
//!   Fresh ──next()──▶ Active ──next()──▶ Active ─ ─ ▶ Exhausted
//!  (step 0)          (step > 0)                      (terminal page,
//!                                                     no more I/O)
//! ```
//!
//! A cursor must be driven by one task at a time. `next` takes `&mut self`
//! for that reason; there is no internal locking. Separate cursors are
//! independent and can run concurrently.

use super::config::DEFAULT_KEEP_ALIVE;
use super::service::exchange;
use crate::decode::ResultPage;
use crate::error::{Error, Result};
use crate::http::{Transport, TransportRequest};
use crate::types::Method;
use futures::stream::{self, Stream};
use std::sync::Arc;
use tracing::debug;

/// Path of the continuation endpoint
pub const SCROLL_PATH: &str = "/_search/scroll";

/// Outcome of a successful [`ScrollCursor::next`] call
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollStep {
    /// A page with at least one document
    Page(Arc<ResultPage>),
    /// No more pages; repeated calls keep returning this
    EndOfStream,
}

impl ScrollStep {
    /// Check if this is the end of the scroll
    pub fn is_end(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// The page, if this step produced one
    pub fn page(&self) -> Option<&Arc<ResultPage>> {
        match self {
            Self::Page(page) => Some(page),
            Self::EndOfStream => None,
        }
    }

    /// Take the page, if this step produced one
    pub fn into_page(self) -> Option<Arc<ResultPage>> {
        match self {
            Self::Page(page) => Some(page),
            Self::EndOfStream => None,
        }
    }
}

/// Where a cursor is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Holds the initiation response, nothing stepped yet
    Fresh,
    /// Holds a page with documents
    Active,
    /// Holds a terminal page; `next` no longer touches the network
    Exhausted,
}

/// Cursor over a server-side scroll context
pub struct ScrollCursor {
    transport: Arc<dyn Transport>,
    keep_alive: Option<String>,
    pretty: bool,
    debug: bool,
    current: Arc<ResultPage>,
    last_total: Option<u64>,
    step: u64,
}

impl ScrollCursor {
    /// Create a cursor seeded with an initiation response
    pub fn new(transport: Arc<dyn Transport>, page: ResultPage) -> Self {
        let last_total = page.hits.as_ref().map(|hits| hits.total);
        Self {
            transport,
            keep_alive: None,
            pretty: false,
            debug: false,
            current: Arc::new(page),
            last_total,
            step: 0,
        }
    }

    /// Set the keep-alive sent with every continuation
    #[must_use]
    pub fn with_keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Fetch the next page
    ///
    /// Returns [`ScrollStep::EndOfStream`] once a terminal page has been seen,
    /// without another round trip. Fails with [`Error::MissingScrollId`] when
    /// there is no scroll id to continue from. Transport and decode failures
    /// leave the cursor unchanged.
    ///
    /// # Usage
    ///
    /// ```rust,ignore
    /// while let ScrollStep::Page(page) = cursor.next().await? {
    ///     for hit in page.documents() {
    ///         // work with hit
    ///     }
    /// }
    /// ```
    pub async fn next(&mut self) -> Result<ScrollStep> {
        if self.step > 0 && self.current.is_terminal() {
            return Ok(ScrollStep::EndOfStream);
        }

        let scroll_id = self.current.scroll_id().ok_or(Error::MissingScrollId)?;
        let request = self.continuation_request(scroll_id);

        let page = exchange(self.transport.as_ref(), request, self.debug).await?;
        if let Some(hits) = &page.hits {
            self.last_total = Some(hits.total);
        }
        self.current = Arc::new(page);
        self.step += 1;

        if self.current.is_terminal() {
            debug!("Scroll exhausted after {} steps", self.step);
            return Ok(ScrollStep::EndOfStream);
        }

        debug!(
            "Scroll step {}: {} documents of {}",
            self.step,
            self.current.len(),
            self.total_hits()
        );
        Ok(ScrollStep::Page(Arc::clone(&self.current)))
    }

    fn continuation_request(&self, scroll_id: &str) -> TransportRequest {
        let mut request =
            TransportRequest::new(Method::POST, SCROLL_PATH).param("scroll", self.keep_alive());
        if self.pretty {
            request = request.param("pretty", "true");
        }
        // The scroll id goes out verbatim, not wrapped in JSON
        request.text(scroll_id)
    }

    /// Most recently reported total hits, 0 before any hit metadata arrived
    ///
    /// A page without a `hits` object keeps the total seen before it.
    pub fn total_hits(&self) -> u64 {
        self.last_total.unwrap_or(0)
    }

    /// The scroll id the next step would send
    pub fn scroll_id(&self) -> Option<&str> {
        self.current.scroll_id()
    }

    /// The most recently received page
    pub fn current(&self) -> &Arc<ResultPage> {
        &self.current
    }

    /// Number of successful continuation steps
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Effective keep-alive
    pub fn keep_alive(&self) -> &str {
        self.keep_alive
            .as_deref()
            .filter(|keep_alive| !keep_alive.is_empty())
            .unwrap_or(DEFAULT_KEEP_ALIVE)
    }

    pub fn state(&self) -> CursorState {
        if self.step == 0 {
            CursorState::Fresh
        } else if self.current.is_terminal() {
            CursorState::Exhausted
        } else {
            CursorState::Active
        }
    }

    /// Turn the cursor into a stream of pages
    ///
    /// The stream ends at end-of-stream, or right after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Arc<ResultPage>>> + Send {
        stream::unfold(Some(self), |cursor| async move {
            let mut cursor = cursor?;
            match cursor.next().await {
                Ok(ScrollStep::Page(page)) => Some((Ok(page), Some(cursor))),
                Ok(ScrollStep::EndOfStream) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

impl std::fmt::Debug for ScrollCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollCursor")
            .field("keep_alive", &self.keep_alive())
            .field("step", &self.step)
            .field("state", &self.state())
            .field("total_hits", &self.total_hits())
            .finish_non_exhaustive()
    }
}
