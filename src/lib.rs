//! NLLB Client - async client for a remote NLLB translation service
//!
//! This library forwards translation batches, lists supported languages and
//! checks service health, with a mock fallback when the service is down.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use core::{
    client::NllbClient,
    config::{NllbConfig, TimeoutPolicy},
    endpoint::resolve_endpoint,
    error_body::extract_error_message,
    errors::{Result, TranslationError, TIMEOUT_MESSAGE},
    models::{HealthStatus, LanguageDescriptor},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
