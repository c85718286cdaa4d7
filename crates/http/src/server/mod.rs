//! The accepting socket and its accept loop
//!
//! [`Server`] owns the listening socket for the lifetime of the process.
//! It owns no sessions: each accepted connection gets an independently
//! reference-counted [`Session`](crate::connection::Session), reachable
//! from the accept loop only through a weak back-reference, so a session
//! torn down by a peer reset cannot be dereferenced by a late completion.

mod error;
mod server;

pub use error::ServerError;
pub use server::Server;
