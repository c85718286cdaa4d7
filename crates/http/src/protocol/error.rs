use thiserror::Error;

/// Errors raised while assembling an inbound message.
///
/// An incomplete message is not an error: the parser keeps returning
/// `Ok(false)` until more bytes arrive. Only input that can never form a
/// valid message fails, so a session can drop the connection right away
/// instead of waiting forever.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },
}

impl ParseError {
    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }
}
