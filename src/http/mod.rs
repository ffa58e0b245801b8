//! HTTP protocol implementation.
//!
//! This module implements a GET-only HTTP/1.1 static file server with
//! support for persistent connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection read/respond state machine and idle deadline
//! - **`parser`**: Parses and validates request heads from byte buffers
//! - **`request`**: Request representation and canonical header storage
//! - **`builder`**: Classifies requests against the document root
//! - **`response`**: Response representation and the status table
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//! - **`date`**: Header date formatting
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Wait (bounded by the idle deadline) for a request
//!        └──────┬───────────┘
//!               │ Request parsed, or parse failure → 400
//!               │ (idle timeout / EOF with nothing received → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Write status line, sorted headers, file body
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ 200 without Connection: close → AwaitingRequest (same connection)
//!               └─ otherwise → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use statica::http::builder::ResponseBuilder;
//! use statica::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let builder = Arc::new(ResponseBuilder::new("www")?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let builder = builder.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, builder, Duration::from_secs(5));
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod builder;
pub mod connection;
pub mod writer;
pub mod mime;
pub mod date;
