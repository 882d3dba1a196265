use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Person,
    Title,
}

impl KeyKind {
    pub fn field(&self) -> &'static str {
        match self {
            KeyKind::Person => "nconst",
            KeyKind::Title => "tconst",
        }
    }
}

/// Check a driving key before it is used in a pipeline.
pub fn validate_key(kind: KeyKind, raw: &str) -> Result<&str, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Empty(kind.field()));
    }

    let reason = if raw.starts_with('$') {
        Some("must not start with `$`")
    } else if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("must not contain whitespace or control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationError::Malformed {
            key: kind.field(),
            value: raw.to_string(),
            reason,
        }),
        None => Ok(raw),
    }
}
