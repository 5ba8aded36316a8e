mod collection;
mod engine;
mod error;

pub use collection::MemoryStorageCollection;
pub use engine::MemoryStorageEngine;
pub use error::MemoryError;
