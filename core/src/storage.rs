use std::sync::Arc;

use async_trait::async_trait;
use keyql::ast::Selection;

use crate::document::Document;
use crate::error::StorageError;
use crate::id::EntityId;

#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Opens and/or creates a storage collection whose rows are addressed by `id_field` in selections.
    async fn collection(&self, name: &str, id_field: &str) -> Result<Arc<dyn StorageCollection>, StorageError>;
}

/// A single collection. `fetch` must honor the full selection: predicate, order (rows come back in
/// exactly the requested order), limit and field projection. Typed comparisons never match null
/// or undefined fields.
#[async_trait]
pub trait StorageCollection: Send + Sync {
    /// Insert or replace. Returns true when the document was new.
    async fn set_document(&self, document: Document) -> Result<bool, StorageError>;

    async fn get_document(&self, id: EntityId) -> Result<Option<Document>, StorageError>;

    async fn fetch(&self, selection: &Selection) -> Result<Vec<Document>, StorageError>;

    async fn set_documents(&self, documents: Vec<Document>) -> Result<(), StorageError> {
        for document in documents {
            self.set_document(document).await?;
        }
        Ok(())
    }

    async fn create_index(&self, _field: &str) -> Result<(), StorageError> { Ok(()) }
}
