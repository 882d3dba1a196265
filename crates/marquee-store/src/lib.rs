mod error;
mod store;

pub use error::StoreError;
pub use store::PipelineStore;

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;
