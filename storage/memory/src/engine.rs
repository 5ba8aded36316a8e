use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use keyseek_core::error::StorageError;
use keyseek_core::storage::{StorageCollection, StorageEngine};
use tracing::debug;

use crate::collection::MemoryStorageCollection;
use crate::error::MemoryError;

/// Thread-safe storage engine holding every collection in process memory.
#[derive(Default)]
pub struct MemoryStorageEngine {
    collections: RwLock<HashMap<String, Arc<MemoryStorageCollection>>>,
}

impl MemoryStorageEngine {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl StorageEngine for MemoryStorageEngine {
    async fn collection(&self, name: &str, id_field: &str) -> Result<Arc<dyn StorageCollection>, StorageError> {
        let mut collections = self.collections.write().map_err(|_| MemoryError::Poisoned("collections"))?;
        let collection = collections
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("MemoryStorageEngine: creating collection {}", name);
                Arc::new(MemoryStorageCollection::new(name, id_field))
            })
            .clone();
        Ok(collection)
    }
}
