//! Core client module

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error_body;
pub mod errors;
pub mod models;
