use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    In,
    Nin,
}

impl Operator {
    /// Native operator key, `None` for implicit equality.
    pub fn as_native(&self) -> Option<&'static str> {
        match self {
            Operator::Eq => None,
            Operator::In => Some("$in"),
            Operator::Nin => Some("$nin"),
        }
    }
}
