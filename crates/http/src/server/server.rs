use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{debug, error, info};

use crate::connection::Session;
use crate::handler::Handler;
use crate::server::ServerError;

/// The accepting side of the server.
///
/// Binds eagerly so the resolved address is observable before the accept
/// loop starts, then [`run`](Server::run) accepts connections forever:
/// each accept constructs a [`Session`], starts it with a bridging
/// closure holding only a weak reference to it, and immediately re-arms
/// acceptance regardless of whether the previous connection is still
/// active. There is no admission control.
pub struct Server {
    listener: TcpListener,
    handler: Arc<dyn Handler>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server").field("listener", &self.listener).finish_non_exhaustive()
    }
}

impl Server {
    /// Binds the listening socket and wires the business handler.
    pub async fn bind<A: ToSocketAddrs>(addr: A, handler: impl Handler) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await.map_err(ServerError::bind)?;
        Ok(Self { listener, handler: Arc::new(handler) })
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until an accept error occurs.
    ///
    /// An accept error is fatal for the listener: it is logged and
    /// returned, and no automatic restart is attempted.
    pub async fn run(self) -> Result<(), ServerError> {
        info!(local_addr = ?self.listener.local_addr().ok(), "start accepting connections");

        loop {
            let (tcp_stream, remote_addr) = match self.listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    error!(cause = %e, "handle new session error");
                    return Err(ServerError::accept(e));
                }
            };
            debug!(%remote_addr, "accepted connection");

            let (reader, writer) = tcp_stream.into_split();
            let session = Session::new(writer);
            let weak_session = Arc::downgrade(&session);
            let handler = Arc::clone(&self.handler);

            session.start(
                reader,
                Box::new(move |message| {
                    // a session already torn down resolves to None and the
                    // completion becomes a no-op
                    match weak_session.upgrade() {
                        Some(session) => handler.call(session, message),
                        None => debug!("session is gone, dropping completed message"),
                    }
                }),
            );
        }
    }
}
