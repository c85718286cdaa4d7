//! A minimal asynchronous single-shot HTTP server
//!
//! This crate provides a deliberately small HTTP/1.1 server built on top of tokio.
//! Every accepted connection serves exactly one request: the server reassembles one
//! inbound message across arbitrary network fragmentation, hands it to a business
//! callback, and writes back whatever response bytes the callback enqueues.
//!
//! # Features
//!
//! - Asynchronous I/O using tokio, one task per connection side
//! - Incremental request parsing that is safe under any chunk boundaries
//! - Case-insensitive header lookup on the parsed message
//! - Strictly ordered response transmission with one write in flight
//! - Clean error handling and structured logging
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use simple_http::codec::MessageBuilder;
//! use simple_http::connection::Session;
//! use simple_http::protocol::ParsedMessage;
//! use simple_http::server::Server;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::bind("127.0.0.1:8080", handle)
//!         .await
//!         .expect("bind server error");
//!     server.run().await.expect("server stopped");
//! }
//!
//! fn handle(session: Arc<Session>, message: ParsedMessage) {
//!     let mut builder = MessageBuilder::new();
//!     builder.write_content("Hello World!\r\n", "text/plain");
//!     session.write(builder.into_message());
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`server`]: The accepting socket and the accept loop
//! - [`connection`]: Per-connection sessions driving reads and ordered writes
//! - [`codec`]: Incremental message parsing and response rendering
//! - [`protocol`]: The parsed message type and parse errors
//! - [`handler`]: The business callback seam
//!
//! # Limitations
//!
//! These are scope boundaries of the design, not accidents:
//!
//! - One request and one response per connection; the read side is never
//!   re-armed after a complete message, and there is no keep-alive
//! - No chunked transfer encoding, pipelining, TLS, or routing
//! - Responses always use `200 OK` framing; application-level failures are
//!   reported in the body text only
//! - No timeouts and no admission control: a peer that never completes a
//!   message holds its session in memory until it closes the connection

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;
