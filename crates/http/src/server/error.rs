use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bind address error: {source}")]
    Bind {
        #[source]
        source: io::Error,
    },

    #[error("accept connection error: {source}")]
    Accept {
        #[source]
        source: io::Error,
    },
}

impl ServerError {
    pub fn bind(e: io::Error) -> Self {
        Self::Bind { source: e }
    }

    pub fn accept(e: io::Error) -> Self {
        Self::Accept { source: e }
    }
}
