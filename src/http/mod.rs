//! HTTP protocol implementation.
//!
//! This module implements the small slice of HTTP/1.1 the server needs:
//! `GET` and `HEAD` over persistent connections, with bodies streamed from
//! disk.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Frames and parses header blocks from a byte buffer
//! - **`request`**: Parsed request representation
//! - **`handler`**: The `Handler` trait and the descriptor-backed `FileHandler`
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes the head and streams the body to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a complete header block
//!        └──────┬──────┘
//!               │ Request parsed (bad request → Closed, no response)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve the route, open the file
//!        └──────┬───────────┘
//!               │ 200 / 404 / 500 ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Head, then body in 4 KiB chunks
//!        └──────┬───────────┘
//!               │ Response sent (short read → connection dropped)
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pathmap::http::connection::Connection;
//! use pathmap::http::handler::FileHandler;
//! use pathmap::routes::Resolver;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handler = Arc::new(FileHandler::new(Resolver::new("/srv/site/routes.json")));
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, handler);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod handler;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
