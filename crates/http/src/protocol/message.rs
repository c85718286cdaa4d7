//! The assembled inbound message.

use std::collections::HashMap;

use bytes::Bytes;

/// One fully assembled HTTP request message.
///
/// Produced by [`MessageParser`](crate::codec::MessageParser) on the write
/// call that completes the message. Header names are stored lowercased, so
/// [`header`](ParsedMessage::header) lookup is case-insensitive; when a
/// header name repeats, the last value wins.
#[derive(Debug, Default)]
pub struct ParsedMessage {
    /// Every raw byte received up to completion, headers included.
    pub(crate) raw: Bytes,
    /// Raw non-header lines in arrival order, kept for diagnostics.
    pub(crate) lines: Vec<String>,
    /// Lowercased header name to trimmed value.
    pub(crate) headers: HashMap<String, String>,
    /// Message body; empty when no `Content-Length` header was present.
    pub(crate) body: Bytes,
    /// First whitespace-delimited token of the request line.
    pub(crate) method: Option<String>,
}

impl ParsedMessage {
    /// Returns the method token of the request line, e.g. `POST`.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Looks up a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns the message body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the raw bytes the message was assembled from.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the non-header lines seen while parsing, in arrival order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
