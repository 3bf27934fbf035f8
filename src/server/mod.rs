//! Connection acceptance.
//!
//! The listener owns the socket and nothing else: every accepted connection
//! gets its own task and a shared, read-only handler.

pub mod listener;

pub use listener::{run, serve};
