use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid pipeline: {0}")]
    InvalidPipeline(String),

    #[error("storage error: {0}")]
    Storage(String),
}
