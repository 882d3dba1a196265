use std::sync::Arc;

use bson::Document;
use marquee_pipeline::Stage;

use crate::error::StoreError;

/// A document store that can run an aggregation pipeline.
///
/// One call is one round trip. Implementations own connection pooling and
/// must be safe to share across threads.
pub trait PipelineStore: Send + Sync {
    /// Run `stages` in order against `collection` and return the resulting
    /// documents in pipeline output order.
    fn aggregate(&self, collection: &str, stages: &[Stage]) -> Result<Vec<Document>, StoreError>;
}

impl<T: PipelineStore + ?Sized> PipelineStore for Arc<T> {
    fn aggregate(&self, collection: &str, stages: &[Stage]) -> Result<Vec<Document>, StoreError> {
        (**self).aggregate(collection, stages)
    }
}
