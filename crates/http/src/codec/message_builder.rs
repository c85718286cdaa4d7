//! Renderer for the single success response shape the server produces.

use bytes::{BufMut, Bytes, BytesMut};

/// Builder for one minimal `200 OK` response.
///
/// The rendered message is a status line, a `Content-Type` header carrying
/// the caller-supplied value verbatim, a `Content-Length` header with the
/// exact byte length of the body, an empty line, then the body unmodified.
/// No escaping and no additional headers. Application-level failures are
/// reported through the body text, never through a non-200 status.
///
/// The builder is single-use: call
/// [`write_content`](MessageBuilder::write_content) once, then take the
/// bytes with [`into_message`](MessageBuilder::into_message).
#[derive(Debug, Default)]
pub struct MessageBuilder {
    buffer: BytesMut,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the response for `content` with the given content type.
    pub fn write_content(&mut self, content: &str, content_type: &str) {
        debug_assert!(self.buffer.is_empty(), "write_content called twice");
        self.buffer.reserve(64 + content_type.len() + content.len());
        self.buffer.put_slice(b"HTTP/1.1 200 OK\r\n");
        self.buffer.put_slice(b"Content-Type: ");
        self.buffer.put_slice(content_type.as_bytes());
        self.buffer.put_slice(b"\r\n");
        self.buffer.put_slice(b"Content-Length: ");
        self.buffer.put_slice(content.len().to_string().as_bytes());
        self.buffer.put_slice(b"\r\n\r\n");
        self.buffer.put_slice(content.as_bytes());
    }

    /// Returns the rendered response bytes.
    pub fn into_message(self) -> Bytes {
        self.buffer.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MessageParser;

    #[test]
    fn renders_exact_bytes() {
        let mut builder = MessageBuilder::new();
        builder.write_content("hello", "text/plain");
        assert_eq!(
            &builder.into_message()[..],
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello"
        );
    }

    #[test]
    fn renders_empty_body() {
        let mut builder = MessageBuilder::new();
        builder.write_content("", "text/plain");
        assert_eq!(&builder.into_message()[..], b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn content_length_counts_bytes_not_chars() {
        let mut builder = MessageBuilder::new();
        builder.write_content("héllo", "text/plain; charset=utf-8");
        let rendered = builder.into_message();
        let rendered = std::str::from_utf8(&rendered).unwrap();
        assert!(rendered.contains("Content-Length: 6\r\n"));
    }

    #[test]
    fn round_trips_through_the_parser() {
        let mut builder = MessageBuilder::new();
        builder.write_content("{\"sent\": true}", "application/json");

        let mut parser = MessageParser::new();
        assert!(parser.write(&builder.into_message()).unwrap());

        let message = parser.into_message();
        assert_eq!(message.header("content-type"), Some("application/json"));
        assert_eq!(message.body(), b"{\"sent\": true}");
    }
}
