use bson::Document;
use marquee_pipeline::{Aggregation, JoinShape};
use marquee_store::{PipelineStore, StoreError};
use tracing::{debug, warn};

use crate::scope::{ScopeGuard, ScopeProvider};

/// Runs composed pipelines against the store, one traced scope per call.
pub struct JoinExecutor<S, P> {
    store: S,
    scopes: P,
}

impl<S: PipelineStore, P: ScopeProvider> JoinExecutor<S, P> {
    pub fn new(store: S, scopes: P) -> Self {
        Self { store, scopes }
    }

    /// Submit `aggregation` for `shape`. The scope is closed before any error
    /// reaches the caller.
    pub fn execute(
        &self,
        shape: JoinShape,
        key: &str,
        aggregation: &Aggregation,
    ) -> Result<Vec<Document>, StoreError> {
        let mut scope = ScopeGuard::begin(&self.scopes, shape.operation());
        scope.annotate("event", shape.event());
        scope.annotate("value", key);

        debug!(
            collection = %aggregation.collection,
            pipeline = ?aggregation.to_pipeline(),
            "submitting pipeline"
        );

        match self
            .store
            .aggregate(&aggregation.collection, &aggregation.stages)
        {
            Ok(docs) => {
                scope.annotate("documents", &docs.len().to_string());
                Ok(docs)
            }
            Err(e) => {
                scope.annotate("error", &e.to_string());
                warn!(operation = shape.operation(), error = %e, "pipeline execution failed");
                Err(e)
            }
        }
    }
}
