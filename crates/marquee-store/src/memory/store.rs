use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use arc_swap::ArcSwap;
use bson::Document;
use imbl::Vector;
use marquee_pipeline::Stage;

use crate::error::StoreError;
use crate::store::PipelineStore;

use super::eval;

pub(crate) type Collection = Vector<Document>;

/// In-process document store. Readers work on snapshots; writers swap in a
/// new version of a collection under a single write lock.
///
/// Matching is type-exact: numbers of different widths never compare equal and
/// array fields are not matched element-wise.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Arc<ArcSwap<Collection>>>>,
    write_lock: Mutex<()>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Append documents to a collection, creating it if needed. Returns the
    /// number of documents inserted.
    pub fn insert_many(
        &self,
        collection: &str,
        docs: impl IntoIterator<Item = Document>,
    ) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().map_err(poisoned)?;

        let slot = {
            let mut collections = self.collections.write().map_err(poisoned)?;
            Arc::clone(
                collections
                    .entry(collection.to_string())
                    .or_insert_with(|| Arc::new(ArcSwap::from_pointee(Vector::new()))),
            )
        };

        let mut next = (**slot.load()).clone();
        let before = next.len();
        next.extend(docs);
        let inserted = next.len() - before;
        slot.store(Arc::new(next));
        Ok(inserted)
    }

    /// Snapshot a collection. A collection that was never written reads as empty.
    fn snapshot(&self, name: &str) -> Result<Arc<Collection>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(match collections.get(name) {
            Some(slot) => slot.load_full(),
            None => Arc::new(Vector::new()),
        })
    }
}

impl PipelineStore for MemoryStore {
    fn aggregate(&self, collection: &str, stages: &[Stage]) -> Result<Vec<Document>, StoreError> {
        eval::validate(stages)?;

        let source = self.snapshot(collection)?;
        let mut docs: Vec<Document> = source.iter().cloned().collect();

        for stage in stages {
            docs = match stage {
                Stage::Match(filter) => docs
                    .into_iter()
                    .filter(|doc| eval::matches(filter, doc))
                    .collect(),
                Stage::Lookup(lookup) => {
                    let foreign = self.snapshot(&lookup.from)?;
                    let foreign: Vec<&Document> = foreign.iter().collect();
                    docs.into_iter()
                        .map(|doc| eval::lookup(lookup, doc, &foreign))
                        .collect()
                }
                Stage::Project(projection) => docs
                    .into_iter()
                    .map(|doc| eval::project(projection, doc))
                    .collect::<Result<_, _>>()?,
            };
        }

        Ok(docs)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Storage("memory store lock poisoned".into())
}
