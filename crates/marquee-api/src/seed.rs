use std::collections::BTreeMap;
use std::path::Path;

use marquee_store::{MemoryStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed seed file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Load `{ "<collection>": [documents...] }` into the store. Returns the
/// number of documents inserted.
pub fn load_seed(store: &MemoryStore, path: &Path) -> Result<usize, SeedError> {
    let bytes = std::fs::read(path)?;
    let collections: BTreeMap<String, Vec<bson::Document>> = serde_json::from_slice(&bytes)?;

    let mut total = 0;
    for (name, docs) in collections {
        let inserted = store.insert_many(&name, docs)?;
        tracing::info!(collection = %name, inserted, "seeded collection");
        total += inserted;
    }
    Ok(total)
}
