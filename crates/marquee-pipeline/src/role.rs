use serde::{Deserialize, Serialize};

use crate::fields;
use crate::filter::Filter;
use crate::stage::Stage;

/// Categories counted as cast. Matching is exact and case-sensitive.
pub const CAST_CATEGORIES: [&str; 2] = ["actor", "actress"];

/// Which principal entries a title→people query keeps. Crew is the complement
/// of cast: any category that is not a cast category, or no category at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFilter {
    #[default]
    All,
    Cast,
    Crew,
}

impl RoleFilter {
    /// The `$match` stage for this filter, `None` for `All`.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            RoleFilter::All => None,
            RoleFilter::Cast => Some(Stage::Match(Filter::one_of(
                fields::CATEGORY,
                &CAST_CATEGORIES,
            ))),
            RoleFilter::Crew => Some(Stage::Match(Filter::none_of(
                fields::CATEGORY,
                &CAST_CATEGORIES,
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn all_contributes_no_stage() {
        assert!(RoleFilter::All.stage().is_none());
    }

    #[test]
    fn cast_and_crew_split_on_the_same_categories() {
        let cast = RoleFilter::Cast.stage().unwrap().to_document();
        let crew = RoleFilter::Crew.stage().unwrap().to_document();
        assert_eq!(
            cast,
            doc! { "$match": { "category": { "$in": ["actor", "actress"] } } }
        );
        assert_eq!(
            crew,
            doc! { "$match": { "category": { "$nin": ["actor", "actress"] } } }
        );
    }
}
