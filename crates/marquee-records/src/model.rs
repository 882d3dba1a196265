use bson::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub tconst: String,
    pub title_type: Option<String>,
    pub primary_title: Option<String>,
    pub original_title: Option<String>,
    pub is_adult: bool,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub genres: Option<Vec<String>>,
}

/// A principal entry with its person resolved.
///
/// `person` is the joined person document without its `_id`, or `None` when
/// no person matched the entry's `nconst`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalWithPerson {
    pub tconst: String,
    pub nconst: String,
    pub category: Option<String>,
    pub person: Option<Document>,
}
