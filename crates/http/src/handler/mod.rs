//! The seam between the server core and business logic.
//!
//! The server invokes a [`Handler`] at most once per session, with the
//! live session handle and the parsed message. From that point on the
//! business side is solely responsible for producing a reply by calling
//! [`Session::write`](crate::connection::Session::write) with bytes built
//! by [`MessageBuilder`](crate::codec::MessageBuilder); no reply is sent
//! automatically.

use std::sync::Arc;

use crate::connection::Session;
use crate::protocol::ParsedMessage;

/// Business callback invoked once a session has assembled a full request.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, session: Arc<Session>, message: ParsedMessage);
}

impl<F> Handler for F
where
    F: Fn(Arc<Session>, ParsedMessage) + Send + Sync + 'static,
{
    fn call(&self, session: Arc<Session>, message: ParsedMessage) {
        self(session, message);
    }
}
