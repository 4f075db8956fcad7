use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Feed returned HTTP {0}")]
    Status(u16),

    #[error("Malformed feed: {0}")]
    Parse(String),

    #[error("Fetch ended without a result")]
    Abandoned,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
