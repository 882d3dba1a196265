use bson::Document;
use serde::{Deserialize, Serialize};

use crate::fields;
use crate::filter::Filter;
use crate::role::RoleFilter;
use crate::stage::{Lookup, Projection, Stage};

/// Names of the collections the joins run over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collections {
    /// Principal relation: one document per (title, person, category).
    pub principals: String,
    pub titles: String,
    pub names: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            principals: "principals_mapping".into(),
            titles: "titles".into(),
            names: "names".into(),
        }
    }
}

/// The supported join shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinShape {
    /// person key → titles the person appears in.
    PersonTitles,
    /// title key → principals with their person resolved.
    TitlePrincipals(RoleFilter),
}

impl JoinShape {
    /// Name of the traced operation for this shape.
    pub fn operation(&self) -> &'static str {
        match self {
            JoinShape::PersonTitles => "get-titles-from-person",
            JoinShape::TitlePrincipals(RoleFilter::All) => "get-people-from-title",
            JoinShape::TitlePrincipals(RoleFilter::Crew) => "get-crew-from-title",
            JoinShape::TitlePrincipals(RoleFilter::Cast) => "get-cast-from-title",
        }
    }

    /// Event logged into the operation scope.
    pub fn event(&self) -> &'static str {
        match self {
            JoinShape::PersonTitles => "get-titles-from-person",
            JoinShape::TitlePrincipals(RoleFilter::All) => "query-people-from-title",
            JoinShape::TitlePrincipals(RoleFilter::Crew) => "query-crew-from-title",
            JoinShape::TitlePrincipals(RoleFilter::Cast) => "query-cast-from-title",
        }
    }
}

/// A composed pipeline together with the collection it runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub collection: String,
    pub stages: Vec<Stage>,
}

impl Aggregation {
    /// Native pipeline documents, in stage order.
    pub fn to_pipeline(&self) -> Vec<Document> {
        self.stages.iter().map(Stage::to_document).collect()
    }
}

/// Build the pipeline for `shape` driven by `key`.
///
/// Stage order is fixed: key match, then role match, then lookup, then
/// projection. The role match must run before the lookup because `category`
/// lives on the principal document, not on the joined one.
pub fn compose(shape: JoinShape, key: &str, collections: &Collections) -> Aggregation {
    match shape {
        JoinShape::PersonTitles => titles_for_person(key, collections),
        JoinShape::TitlePrincipals(role) => principals_for_title(key, role, collections),
    }
}

fn titles_for_person(nconst: &str, collections: &Collections) -> Aggregation {
    let stages = vec![
        Stage::Match(Filter::eq(fields::NCONST, nconst)),
        Stage::Lookup(Lookup {
            from: collections.titles.clone(),
            local_field: fields::TCONST.into(),
            foreign_field: fields::TCONST.into(),
            as_field: fields::TITLE_INFO.into(),
        }),
        Stage::Project(Projection {
            first_elements: vec![fields::TITLE_INFO.into()],
            suppress_id: true,
        }),
    ];
    Aggregation {
        collection: collections.principals.clone(),
        stages,
    }
}

fn principals_for_title(tconst: &str, role: RoleFilter, collections: &Collections) -> Aggregation {
    let mut stages = vec![Stage::Match(Filter::eq(fields::TCONST, tconst))];
    stages.extend(role.stage());
    stages.push(Stage::Lookup(Lookup {
        from: collections.names.clone(),
        local_field: fields::NCONST.into(),
        foreign_field: fields::NCONST.into(),
        as_field: fields::PERSON.into(),
    }));
    Aggregation {
        collection: collections.principals.clone(),
        stages,
    }
}
