//! HTTP transport module
//!
//! Provides the [`Transport`] seam the scroll protocol talks through, and
//! [`HttpTransport`], its reqwest-backed implementation.
//!
//! # Features
//!
//! - **One exchange per call**: no retries, no backoff, no idle connection reuse
//! - **Raw and JSON bodies**: scroll continuations send the bare scroll id
//! - **Authentication**: Integration with auth module

mod client;
mod transport;

pub use client::{HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder};
pub use transport::{check_response, RequestBody, Transport, TransportRequest, TransportResponse};
