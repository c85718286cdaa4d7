//! Core protocol types for the single-shot server.
//!
//! This module holds the data model shared between the codec and the
//! connection layers:
//!
//! - [`ParsedMessage`]: one fully assembled inbound HTTP message
//! - [`ParseError`]: errors raised while assembling a message
//!
//! A [`ParsedMessage`] is produced exactly once per connection by the
//! parser and is immutable from then on; the business callback may read
//! it as often as it likes.

mod message;
pub use message::ParsedMessage;

mod error;
pub use error::ParseError;
