//! Authentication module
//!
//! Supports: Basic, API Key, Bearer
//!
//! Search clusters authenticate every request with a static header, so the
//! `Authenticator` is a pure function of its config: nothing is cached and
//! nothing is refreshed.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
