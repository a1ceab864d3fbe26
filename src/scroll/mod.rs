//! Scan-and-scroll module
//!
//! Iterates over large result sets one page at a time without holding the
//! whole set in memory.
//!
//! # Overview
//!
//! 1. Build a [`ScanConfig`] naming the indices, types, query and keep-alive.
//! 2. [`ScrollClient::scan`] opens a scroll context and returns a [`ScrollCursor`].
//! 3. Call [`ScrollCursor::next`] until it returns [`ScrollStep::EndOfStream`].
//!
//! Each continuation carries only the scroll id and keep-alive. End of data is
//! inferred from the first page with no documents; once seen, the cursor never
//! contacts the server again.

mod config;
mod cursor;
mod service;

pub use config::{ScanConfig, ScanConfigBuilder, ScanConfigDef, DEFAULT_KEEP_ALIVE};
pub use cursor::{CursorState, ScrollCursor, ScrollStep, SCROLL_PATH};
pub use service::{escape_path_segment, initiation_request, search_path, ScrollClient};
