use bson::Document;
use marquee_pipeline::{Collections, JoinShape, RoleFilter, compose};
use marquee_records::{PrincipalWithPerson, Title, map_principals, map_titles};
use marquee_store::{PipelineStore, StoreError};

use crate::error::QueryError;
use crate::executor::JoinExecutor;
use crate::key::{KeyKind, validate_key};
use crate::scope::{ScopeProvider, TracingScopes};

/// Read-only relational views over the principal relation.
///
/// Every operation validates its key, runs exactly one pipeline, and maps the
/// result. Nothing is cached or retried; the service holds no mutable state and
/// can be shared across threads.
pub struct QueryService<S, P = TracingScopes> {
    executor: JoinExecutor<S, P>,
    collections: Collections,
}

impl<S: PipelineStore> QueryService<S, TracingScopes> {
    pub fn new(store: S) -> Self {
        Self::with_scopes(store, TracingScopes)
    }
}

impl<S: PipelineStore, P: ScopeProvider> QueryService<S, P> {
    pub fn with_scopes(store: S, scopes: P) -> Self {
        Self {
            executor: JoinExecutor::new(store, scopes),
            collections: Collections::default(),
        }
    }

    pub fn with_collections(mut self, collections: Collections) -> Self {
        self.collections = collections;
        self
    }

    /// Titles the person appears in. Principal entries whose title is missing
    /// from the titles collection are skipped.
    pub fn titles_for_person(&self, nconst: &str) -> Result<Vec<Title>, QueryError> {
        let nconst = validate_key(KeyKind::Person, nconst)?;
        let docs = self.run(JoinShape::PersonTitles, nconst)?;
        Ok(map_titles(&docs)?)
    }

    pub fn people_for_title(&self, tconst: &str) -> Result<Vec<PrincipalWithPerson>, QueryError> {
        self.principals_for_title(tconst, RoleFilter::All)
    }

    pub fn crew_for_title(&self, tconst: &str) -> Result<Vec<PrincipalWithPerson>, QueryError> {
        self.principals_for_title(tconst, RoleFilter::Crew)
    }

    pub fn cast_for_title(&self, tconst: &str) -> Result<Vec<PrincipalWithPerson>, QueryError> {
        self.principals_for_title(tconst, RoleFilter::Cast)
    }

    pub fn principals_for_title(
        &self,
        tconst: &str,
        role: RoleFilter,
    ) -> Result<Vec<PrincipalWithPerson>, QueryError> {
        let tconst = validate_key(KeyKind::Title, tconst)?;
        let docs = self.run(JoinShape::TitlePrincipals(role), tconst)?;
        Ok(map_principals(docs)?)
    }

    fn run(&self, shape: JoinShape, key: &str) -> Result<Vec<Document>, StoreError> {
        let aggregation = compose(shape, key, &self.collections);
        self.executor.execute(shape, key, &aggregation)
    }
}
