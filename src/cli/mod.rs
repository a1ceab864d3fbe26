//! CLI module
//!
//! Command-line interface for running scans.
//!
//! # Commands
//!
//! - `scan` - Scroll through every matching document, one JSON line each
//! - `count` - Open a scan and report the total hit count only

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, ScanArgs};
pub use runner::Runner;
