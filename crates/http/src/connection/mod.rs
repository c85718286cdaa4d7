//! Per-connection session handling
//!
//! This module owns the lifecycle of one accepted connection:
//!
//! - [`Session`]: drives sequential reads into the parser until one
//!   complete message is assembled, fires the completion callback exactly
//!   once, and transmits enqueued responses strictly in order with a
//!   single write in flight
//!
//! Sessions are reference counted. Every pending task holds a strong
//! handle, the listener keeps only a weak one, and dropping the last
//! strong handle closes the connection.

mod session;

pub use session::Session;
