// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # Solidafy Scroll
//!
//! A Rust-native scan-and-scroll client for walking large search result sets
//! page by page without holding them in memory.
//!
//! ## Features
//!
//! - **Scan initiation**: open a scroll context over any set of indices and types
//! - **Scroll cursor**: step through pages with a deterministic end-of-stream
//! - **Distinct failures**: transport, decode and missing-scroll-id errors never
//!   look like the end of the data
//! - **Pluggable transport**: reqwest out of the box, anything implementing
//!   [`http::Transport`] for tests or custom stacks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_scroll::scroll::{ScanConfig, ScrollClient, ScrollStep};
//! use solidafy_scroll::http::HttpTransportConfig;
//!
//! #[tokio::main]
//! async fn main() -> solidafy_scroll::Result<()> {
//!     let client = ScrollClient::connect(
//!         HttpTransportConfig::builder().base_url("http://localhost:9200").build(),
//!     )?;
//!
//!     let config = ScanConfig::builder()
//!         .index("logs-2024")
//!         .size(500)
//!         .keep_alive("2m")
//!         .build()?;
//!
//!     let mut cursor = client.scan(config).await?;
//!     println!("{} documents to go", cursor.total_hits());
//!
//!     while let ScrollStep::Page(page) = cursor.next().await? {
//!         for hit in page.documents() {
//!             // Process hit
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ScanConfig ──scan()──▶ ScrollCursor ──next()──▶ ScrollStep  │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!        ┌──────────────┬───────┴───────┬───────────────┐
//!        │   Transport  │    Decode     │     Auth      │
//!        ├──────────────┼───────────────┼───────────────┤
//!        │ reqwest      │ ResultPage    │ Basic         │
//!        │ no retries   │ SearchHits    │ API key       │
//!        │ no pooling   │ consistency   │ Bearer        │
//!        └──────────────┴───────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP transport seam and reqwest implementation
pub mod http;

/// Search response decoding
pub mod decode;

/// Scan initiation and the scroll cursor
pub mod scroll;

/// Client configuration files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use decode::{ResultPage, SearchHit};
pub use scroll::{CursorState, ScanConfig, ScrollClient, ScrollCursor, ScrollStep};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
