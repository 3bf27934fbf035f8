//! pathmap - serve a fixed map of URL paths to local files
//!
//! The routing descriptor is re-read on every request, so edits take effect
//! immediately and nothing is ever cached.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
