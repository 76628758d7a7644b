use thiserror::Error;

use crate::validation::SchemaError;

#[derive(Error, Debug)]
pub enum PostkitError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("user not found: {0}")]
    UserNotFound(u32),

    #[error("post not found: {0}")]
    PostNotFound(u32),
}

impl PostkitError {
    /// Whether a caller may reasonably try the same request again.
    ///
    /// Transport failures and server-side (5xx, 408, 429) responses are
    /// retryable. Decode errors and client errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            PostkitError::Request(e) => !e.is_decode() && !e.is_builder(),
            PostkitError::Http { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PostkitError>;
