use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// A single-field match condition.
///
/// For `In` / `Nin` the value is a `Bson::Array` of candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub operator: Operator,
    pub value: Bson,
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Bson>) -> Self {
        Self {
            field: field.to_string(),
            operator: Operator::Eq,
            value: value.into(),
        }
    }

    pub fn one_of(field: &str, values: &[&str]) -> Self {
        Self::set(field, Operator::In, values)
    }

    pub fn none_of(field: &str, values: &[&str]) -> Self {
        Self::set(field, Operator::Nin, values)
    }

    fn set(field: &str, operator: Operator, values: &[&str]) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value: Bson::Array(values.iter().map(|v| Bson::from(*v)).collect()),
        }
    }

    /// Render as the body of a `$match` stage.
    pub fn to_document(&self) -> Document {
        let mut out = Document::new();
        match self.operator.as_native() {
            None => {
                out.insert(self.field.clone(), self.value.clone());
            }
            Some(op) => {
                let mut condition = Document::new();
                condition.insert(op, self.value.clone());
                out.insert(self.field.clone(), condition);
            }
        }
        out
    }
}
