use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Postkit(#[from] postkit::PostkitError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("terminal error: {0}")]
    Terminal(String),

    /// Input was rejected by validation; the messages were already printed.
    #[error("{0} rejected")]
    Rejected(&'static str),
}

impl From<postkit::SchemaError> for AppError {
    fn from(e: postkit::SchemaError) -> Self {
        AppError::Postkit(e.into())
    }
}
