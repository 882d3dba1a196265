use marquee_records::FieldCoercionError;
use marquee_store::StoreError;

/// The driving key was rejected before anything was sent to the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{key} `{value}` is malformed: {reason}")]
    Malformed {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("store execution failed: {0}")]
    StoreExecution(#[from] StoreError),

    #[error("could not map result document: {0}")]
    FieldCoercion(#[from] FieldCoercionError),
}
