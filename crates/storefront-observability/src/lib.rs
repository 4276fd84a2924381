//! Observability for the storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging keyed by session ID
//! - `LogSink` - Stderr or in-memory output for emitted entries

mod logging;

pub use logging::*;
