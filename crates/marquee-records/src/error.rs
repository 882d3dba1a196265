use bson::spec::ElementType;

/// A document field could not be converted to its record type.
///
/// This is a data quality problem in the store; retrying will not help.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("field `{field}`: {failure}")]
pub struct FieldCoercionError {
    pub field: String,
    pub failure: CoercionFailure,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoercionFailure {
    #[error("required field is missing")]
    Missing,

    #[error("expected {expected}, found {found:?}")]
    WrongType {
        expected: &'static str,
        found: ElementType,
    },

    #[error("`{0}` is not an integer")]
    NotAnInteger(String),

    #[error("integer {0} is out of range")]
    OutOfRange(i64),
}

impl FieldCoercionError {
    pub(crate) fn new(field: &str, failure: CoercionFailure) -> Self {
        Self {
            field: field.to_string(),
            failure,
        }
    }
}
