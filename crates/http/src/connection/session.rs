use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::codec::MessageParser;
use crate::protocol::ParsedMessage;

/// Scratch buffer size for each read.
const MAX_BUF: usize = 8 * 1024;

/// One-shot hook fired when a session has assembled one full request.
pub(crate) type CompletionCallback = Box<dyn FnOnce(ParsedMessage) + Send + 'static>;

/// The per-connection object owning a socket, parser state, and an
/// outbound queue.
///
/// A session serves exactly one request cycle: its read task feeds the
/// parser until one message is complete, fires the completion callback,
/// and never re-arms the read side. The write side is independent:
/// [`write`](Session::write) enqueues fully rendered response bytes which
/// a dedicated task transmits strictly in enqueue order, one transmission
/// in flight at a time.
///
/// Sessions are handed out as `Arc<Session>`. The read task keeps one
/// strong handle while it runs, as does any business code that cloned the
/// handle out of its callback; once the last strong handle is gone the
/// outbound queue closes, the writer drains whatever is already enqueued,
/// and the connection shuts down.
#[derive(Debug)]
pub struct Session {
    outbound: mpsc::UnboundedSender<Bytes>,
}

impl Session {
    /// Creates a session around the write half of an accepted connection
    /// and spawns its writer task.
    pub(crate) fn new<W>(writer: W) -> Arc<Self>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (outbound, pending) = mpsc::unbounded_channel();
        tokio::spawn(write_loop(writer, pending));
        Arc::new(Self { outbound })
    }

    /// Records the completion callback and begins reading.
    ///
    /// The callback fires at most once, on the read during which the
    /// message becomes complete. A peer that closes the connection first
    /// never triggers it.
    pub(crate) fn start<R>(self: &Arc<Self>, reader: R, callback: CompletionCallback)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        tokio::spawn(Arc::clone(self).read_loop(reader, callback));
    }

    /// Enqueues one fully rendered response for transmission.
    ///
    /// Messages are transmitted in enqueue order and never interleaved.
    /// The call only enqueues; transmission happens on the writer task.
    pub fn write(&self, message: Bytes) {
        if self.outbound.send(message).is_err() {
            warn!("connection writer is gone, dropping outbound message");
        }
    }

    /// Reads sequentially until the parser signals one complete message.
    ///
    /// Holding `self` keeps the session alive for as long as the read is
    /// pending, mirroring the strong reference each in-flight operation
    /// owns.
    async fn read_loop<R>(self: Arc<Self>, mut reader: R, callback: CompletionCallback)
    where
        R: AsyncRead + Unpin,
    {
        let mut parser = MessageParser::new();
        let mut buf = [0u8; MAX_BUF];
        loop {
            match reader.read(&mut buf).await {
                // clean end-of-stream before a complete message: no callback
                Ok(0) => {
                    debug!("peer closed before sending a complete message");
                    return;
                }
                Ok(n) => match parser.write(&buf[..n]) {
                    Ok(true) => {
                        callback(parser.into_message());
                        return;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        error!(cause = %e, "dropping connection with unparsable message");
                        return;
                    }
                },
                Err(e) => {
                    error!(cause = %e, "peer read error");
                    return;
                }
            }
        }
    }
}

/// Transmits queued messages one at a time, in queue order.
///
/// A write error abandons the rest of the queue. When every session
/// handle is gone the queue closes; the remaining messages are flushed
/// and the connection is shut down.
async fn write_loop<W>(mut writer: W, mut pending: mpsc::UnboundedReceiver<Bytes>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = pending.recv().await {
        if let Err(e) = writer.write_all(&message).await {
            error!(cause = %e, "peer write error");
            return;
        }
        if let Err(e) = writer.flush().await {
            error!(cause = %e, "peer write error");
            return;
        }
    }
    let _ = writer.shutdown().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::io::duplex;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn complete_message_fires_callback_once() {
        let (client, server) = duplex(1024);
        let (server_read, server_write) = tokio::io::split(server);
        let (mut client_read, mut client_write) = tokio::io::split(client);

        let session = Session::new(server_write);
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();
        let counted = Arc::clone(&calls);
        session.start(
            server_read,
            Box::new(move |message| {
                counted.fetch_add(1, Ordering::SeqCst);
                tx.send(message).unwrap();
            }),
        );

        client_write.write_all(b"POST /fund HTTP/1.1\r\nContent-Length: 4\r\n\r\nabcd").await.unwrap();

        let message = rx.await.unwrap();
        assert_eq!(message.method(), Some("POST"));
        assert_eq!(message.body(), b"abcd");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        session.write(Bytes::from_static(b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nok"));
        drop(session);

        let mut reply = Vec::new();
        client_read.read_to_end(&mut reply).await.unwrap();
        assert!(reply.ends_with(b"ok"));
    }

    #[tokio::test]
    async fn peer_closing_early_never_fires_callback() {
        let (client, server) = duplex(1024);
        let (server_read, server_write) = tokio::io::split(server);
        let (_, mut client_write) = tokio::io::split(client);

        let session = Session::new(server_write);
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        session.start(
            server_read,
            Box::new(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
            }),
        );

        // no empty line ever arrives
        client_write.write_all(b"POST /x HTT").await.unwrap();
        client_write.shutdown().await.unwrap();
        drop(client_write);
        drop(session);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn queued_writes_transmit_in_order_without_interleaving() {
        // a tiny pipe stalls the first transmission while the second is
        // already queued
        let (client, server) = duplex(8);
        let (_server_read, server_write) = tokio::io::split(server);
        let (mut client_read, _client_write) = tokio::io::split(client);

        let session = Session::new(server_write);
        session.write(Bytes::from(vec![b'A'; 64]));
        session.write(Bytes::from(vec![b'B'; 64]));
        drop(session);

        // let both messages pile up behind the stalled pipe before reading
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut wire = Vec::new();
        client_read.read_to_end(&mut wire).await.unwrap();

        let mut expected = vec![b'A'; 64];
        expected.extend(vec![b'B'; 64]);
        assert_eq!(wire, expected);
    }

    #[tokio::test]
    async fn fragmented_request_is_reassembled() {
        let (client, server) = duplex(1024);
        let (server_read, server_write) = tokio::io::split(server);
        let (_client_read, mut client_write) = tokio::io::split(client);

        let session = Session::new(server_write);
        let (tx, rx) = oneshot::channel();
        session.start(
            server_read,
            Box::new(move |message| {
                tx.send(message).unwrap();
            }),
        );

        // split inside the line terminator and inside the body
        for chunk in [&b"GET /ping HTTP/1.1\r"[..], b"\nHost: a\r\nContent-Length: 5\r\n\r\npi", b"ng!"] {
            client_write.write_all(chunk).await.unwrap();
            client_write.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let message = rx.await.unwrap();
        assert_eq!(message.method(), Some("GET"));
        assert_eq!(message.body(), b"ping!");
    }
}
