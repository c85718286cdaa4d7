//! Codec module for assembling requests and rendering responses
//!
//! This module provides the two byte-level workers of the server:
//!
//! - [`MessageParser`]: Incrementally reassembles one inbound HTTP message
//!   from raw chunks, resuming its scan wherever the previous chunk ended
//! - [`MessageBuilder`]: Renders one `200 OK` response from a body and a
//!   content type
//!
//! # Example
//!
//! ```
//! use simple_http::codec::{MessageBuilder, MessageParser};
//!
//! let mut parser = MessageParser::new();
//! let complete = parser.write(b"GET / HTTP/1.1\r\n\r\n").unwrap();
//! assert!(complete);
//! let message = parser.into_message();
//! assert_eq!(message.method(), Some("GET"));
//!
//! let mut builder = MessageBuilder::new();
//! builder.write_content("hello", "text/plain");
//! let response = builder.into_message();
//! assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

mod message_builder;
mod message_parser;

pub use message_builder::MessageBuilder;
pub use message_parser::MessageParser;
