//! Incremental parser reassembling one HTTP request from raw chunks
//!
//! The parser accumulates every chunk it is given and advances a scan
//! cursor over the buffer looking for CRLF line terminators. The cursor is
//! resumable: a terminator split across two chunks (CR at the end of one
//! read, LF at the start of the next) is handled like any other input, and
//! the scan never inspects bytes past the end of the accumulated buffer.
//!
//! Parsing rules:
//!
//! - A line containing a colon is a header; the name is lowercased, the
//!   value loses its leading spaces, and a repeated name overwrites the
//!   previous value
//! - A line without a colon contributes the method token (first
//!   whitespace-delimited token, recorded once) and is retained verbatim
//!   for diagnostics
//! - An empty line ends the header section; without a `Content-Length`
//!   header the message is complete with an empty body, otherwise the
//!   message completes once at least that many bytes have accumulated
//!   after the empty line, and the body is *everything* after it
//!
//! An unparseable `Content-Length` value is rejected immediately rather
//! than being treated as a message that never completes.

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::protocol::{ParseError, ParsedMessage};

/// Parsing progress across `write` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Scanning header lines.
    Headers,
    /// Header section ended; waiting for `length` body bytes after `offset`.
    Body { offset: usize, length: usize },
    /// Message fully determined.
    Complete,
}

/// Incremental single-message parser.
///
/// Feed raw chunks with [`write`](MessageParser::write) until it returns
/// `Ok(true)`, then take the result with
/// [`into_message`](MessageParser::into_message). Writing further chunks
/// after completion is outside the contract; a session never does so.
#[derive(Debug)]
pub struct MessageParser {
    buffer: BytesMut,
    /// Next byte the scan will inspect.
    scan_pos: usize,
    /// Start of the line currently being assembled.
    line_start: usize,
    state: ParseState,
    lines: Vec<String>,
    headers: HashMap<String, String>,
    method: Option<String>,
    body: Bytes,
}

impl MessageParser {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::new(),
            scan_pos: 0,
            line_start: 0,
            state: ParseState::Headers,
            lines: Vec::new(),
            headers: HashMap::new(),
            method: None,
            body: Bytes::new(),
        }
    }

    /// Appends `chunk` and tries to advance parsing.
    ///
    /// Returns `Ok(true)` exactly once, on the call during which the
    /// message becomes fully determined, and `Ok(false)` on every call
    /// that leaves it incomplete.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidContentLength`] if the header section
    /// ends with a `Content-Length` value that is not a non-negative
    /// integer.
    pub fn write(&mut self, chunk: &[u8]) -> Result<bool, ParseError> {
        debug_assert!(self.state != ParseState::Complete, "write after completion");
        self.buffer.extend_from_slice(chunk);
        let complete = self.parse()?;
        if complete {
            debug!(size = self.buffer.len(), "received a complete message");
        }
        Ok(complete)
    }

    /// Looks up a header seen so far, matching the name case-insensitively.
    pub fn read_header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Hands the completed message to the caller.
    pub fn into_message(self) -> ParsedMessage {
        ParsedMessage {
            raw: self.buffer.freeze(),
            lines: self.lines,
            headers: self.headers,
            body: self.body,
            method: self.method,
        }
    }

    fn parse(&mut self) -> Result<bool, ParseError> {
        if let ParseState::Body { offset, length } = self.state {
            return Ok(self.try_finish_body(offset, length));
        }

        while self.scan_pos < self.buffer.len() {
            if self.buffer[self.scan_pos] != b'\r' {
                self.scan_pos += 1;
                continue;
            }
            // CR is the last byte we hold: the LF may be in the next chunk,
            // suspend here and resume on the following write
            if self.scan_pos + 1 >= self.buffer.len() {
                return Ok(false);
            }
            if self.buffer[self.scan_pos + 1] != b'\n' {
                self.scan_pos += 1;
                continue;
            }

            let line_end = self.scan_pos;
            let line_start = self.line_start;
            self.scan_pos += 2;
            self.line_start = self.scan_pos;

            if line_end == line_start {
                // empty line: the header section ends here
                return self.finish_headers(self.scan_pos);
            }

            let line = String::from_utf8_lossy(&self.buffer[line_start..line_end]).into_owned();
            self.analyze_line(line);
        }

        Ok(false)
    }

    fn analyze_line(&mut self, line: String) {
        match line.find(':') {
            None => {
                if self.method.is_none() {
                    self.method = line.split_whitespace().next().map(str::to_owned);
                }
                self.lines.push(line);
            }
            Some(pos) => {
                let name = line[..pos].to_ascii_lowercase();
                let value = line[pos + 1..].trim_start_matches(' ').to_owned();
                self.headers.insert(name, value);
            }
        }
    }

    fn finish_headers(&mut self, body_offset: usize) -> Result<bool, ParseError> {
        let Some(value) = self.headers.get("content-length") else {
            // no content-length, no body: any further bytes are not part
            // of this message
            self.state = ParseState::Complete;
            return Ok(true);
        };

        let length = value
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseError::invalid_content_length(format!("value {value:?} is not a non-negative integer")))?;

        Ok(self.try_finish_body(body_offset, length))
    }

    fn try_finish_body(&mut self, offset: usize, length: usize) -> bool {
        if self.buffer.len() - offset < length {
            self.state = ParseState::Body { offset, length };
            return false;
        }

        // the body is everything after the empty line, which may be more
        // than the declared length; callers supply exactly the intended
        // bytes and nothing else
        self.body = Bytes::copy_from_slice(&self.buffer[offset..]);
        self.state = ParseState::Complete;
        true
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}
