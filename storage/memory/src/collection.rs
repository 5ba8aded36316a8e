use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use keyql::ast::Selection;
use keyseek_core::document::{Document, KeyedDocument};
use keyseek_core::error::StorageError;
use keyseek_core::id::EntityId;
use keyseek_core::storage::StorageCollection;
use keyseek_storage_common::ValueSetStream;
use tracing::debug;

use crate::error::MemoryError;

pub struct MemoryStorageCollection {
    name: String,
    id_field: Arc<str>,
    documents: RwLock<BTreeMap<EntityId, Document>>,
    indexes: RwLock<Vec<String>>,
}

impl MemoryStorageCollection {
    pub fn new(name: &str, id_field: &str) -> Self {
        Self { name: name.to_string(), id_field: Arc::from(id_field), documents: RwLock::new(BTreeMap::new()), indexes: RwLock::new(Vec::new()) }
    }

    pub fn name(&self) -> &str { &self.name }

    /// Fields passed to `create_index`, in the order they were first requested.
    pub fn indexes(&self) -> Result<Vec<String>, StorageError> { Ok(self.indexes.read().map_err(|_| MemoryError::Poisoned("indexes"))?.clone()) }

    pub fn len(&self) -> Result<usize, StorageError> { Ok(self.documents.read().map_err(|_| MemoryError::Poisoned("documents"))?.len()) }

    pub fn is_empty(&self) -> Result<bool, StorageError> { Ok(self.len()? == 0) }

    /// Filter, then sort (top-k when limited), then project.
    fn fetch_blocking(&self, selection: &Selection) -> Result<Vec<Document>, StorageError> {
        let documents = self.documents.read().map_err(|_| MemoryError::Poisoned("documents"))?;
        let rows = documents.values().map(|doc| KeyedDocument::new(doc.clone(), self.id_field.clone())).filter_predicate(&selection.predicate);

        let rows: Vec<Document> = match selection.limit {
            Some(limit) => rows.top_k(&selection.order_by, usize::try_from(limit).unwrap_or(usize::MAX)).map(KeyedDocument::into_document).collect(),
            None => rows.sort_by(&selection.order_by).map(KeyedDocument::into_document).collect(),
        };

        Ok(match &selection.fields {
            Some(fields) => rows.iter().map(|row| row.project(fields)).collect(),
            None => rows,
        })
    }
}

#[async_trait]
impl StorageCollection for MemoryStorageCollection {
    async fn set_document(&self, document: Document) -> Result<bool, StorageError> {
        let mut documents = self.documents.write().map_err(|_| MemoryError::Poisoned("documents"))?;
        Ok(documents.insert(document.id, document).is_none())
    }

    async fn get_document(&self, id: EntityId) -> Result<Option<Document>, StorageError> {
        let documents = self.documents.read().map_err(|_| MemoryError::Poisoned("documents"))?;
        Ok(documents.get(&id).cloned())
    }

    async fn fetch(&self, selection: &Selection) -> Result<Vec<Document>, StorageError> {
        let rows = self.fetch_blocking(selection)?;
        debug!("MemoryStorageCollection::fetch {} -> {} rows: {}", self.name, rows.len(), selection);
        Ok(rows)
    }

    async fn create_index(&self, field: &str) -> Result<(), StorageError> {
        let mut indexes = self.indexes.write().map_err(|_| MemoryError::Poisoned("indexes"))?;
        if !indexes.iter().any(|f| f == field) {
            indexes.push(field.to_string());
        }
        Ok(())
    }
}
