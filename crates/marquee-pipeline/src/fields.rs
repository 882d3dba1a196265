//! Field names shared by the composer and the document mapper.

pub const ID: &str = "_id";
pub const NCONST: &str = "nconst";
pub const TCONST: &str = "tconst";
pub const CATEGORY: &str = "category";

/// Nested field the person→titles lookup writes into.
pub const TITLE_INFO: &str = "title_info";
/// Nested field the title→people lookups write into.
pub const PERSON: &str = "person";
