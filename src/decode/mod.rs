//! Search response decoding
//!
//! Serde types for the parts of a search/scroll response the cursor reads:
//! `_scroll_id`, `hits.total` and `hits.hits`, plus the bookkeeping fields
//! (`took`, `timed_out`, `_shards`) that come along with every page.

mod types;

pub use types::{ResultPage, SearchHit, SearchHits, ShardsInfo};
