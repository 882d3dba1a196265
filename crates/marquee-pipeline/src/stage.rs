use bson::{Document, doc};
use serde::{Deserialize, Serialize};

use crate::fields;
use crate::filter::Filter;

/// One step of an aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Match(Filter),
    Lookup(Lookup),
    Project(Projection),
}

/// Left-outer join: every document gets an array of the `from` documents whose
/// `foreign_field` equals its `local_field`, written under `as_field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    pub from: String,
    pub local_field: String,
    pub foreign_field: String,
    pub as_field: String,
}

/// Inclusion projection where each listed array field is replaced by its first
/// element. A field whose array is empty is dropped from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub first_elements: Vec<String>,
    pub suppress_id: bool,
}

impl Stage {
    /// Render as a native pipeline stage document (`$match`, `$lookup`, `$project`).
    pub fn to_document(&self) -> Document {
        match self {
            Stage::Match(filter) => doc! { "$match": filter.to_document() },
            Stage::Lookup(lookup) => doc! {
                "$lookup": {
                    "from": lookup.from.as_str(),
                    "localField": lookup.local_field.as_str(),
                    "foreignField": lookup.foreign_field.as_str(),
                    "as": lookup.as_field.as_str(),
                }
            },
            Stage::Project(projection) => {
                let mut shape = Document::new();
                for name in &projection.first_elements {
                    let path = format!("${name}");
                    shape.insert(name.as_str(), doc! { "$arrayElemAt": [path, 0] });
                }
                if projection.suppress_id {
                    shape.insert(fields::ID, 0);
                }
                doc! { "$project": shape }
            }
        }
    }
}
