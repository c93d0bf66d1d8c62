//! LINE boundary error types.

use thiserror::Error;

/// Errors from webhook parsing and the reply API.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed webhook payload: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("LINE API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Convenience alias for LINE results.
pub type LineResult<T> = Result<T, LineError>;
