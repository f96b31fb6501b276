//! Client error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or timeout
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx reply; `message` is the server's `message` field when present
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
