use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::codec::TokenCodec;
use crate::criteria::Criteria;
use crate::cursor::Cursor;
use crate::document::{Document, Fields};
use crate::error::{MutationError, QueryError, StorageError};
use crate::id::EntityId;
use crate::query::Query;
use crate::schema::Catalog;
use crate::storage::{StorageCollection, StorageEngine};

/// Handle to one entity type: its catalog, its storage collection and the codec for its cursor
/// tokens. Cheap to clone.
#[derive(Clone)]
pub struct Collection {
    catalog: Arc<Catalog>,
    storage: Arc<dyn StorageCollection>,
    codec: Arc<dyn TokenCodec>,
}

impl Collection {
    /// Open the storage collection for `catalog` and create an index for each of its indexed fields.
    pub async fn open(engine: &dyn StorageEngine, catalog: Arc<Catalog>, codec: Arc<dyn TokenCodec>) -> Result<Self, StorageError> {
        let storage = engine.collection(catalog.name(), catalog.id_field()).await?;
        for field in catalog.indexed_fields() {
            storage.create_index(field).await?;
        }
        debug!("Collection::open {}", catalog.name());
        Ok(Self { catalog, storage, codec })
    }

    pub fn name(&self) -> &str { self.catalog.name() }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    pub fn storage(&self) -> &Arc<dyn StorageCollection> { &self.storage }

    pub fn codec(&self) -> &dyn TokenCodec { self.codec.as_ref() }

    pub fn find(&self, criteria: impl Into<Criteria>) -> Result<Query, QueryError> {
        let criteria = criteria.into().rewrite(&self.catalog)?;
        Ok(Query::new(self.clone(), criteria))
    }

    pub fn find_one(&self, criteria: impl Into<Criteria>) -> Result<Query, QueryError> { Ok(self.find(criteria)?.limit(1)) }

    pub async fn get(&self, id: EntityId) -> Result<Option<Document>, StorageError> { self.storage.get_document(id).await }

    pub fn cursor(&self, document: &Document) -> Cursor { Cursor::capture(document, &self.catalog) }

    pub fn encode_cursor(&self, cursor: &Cursor) -> Result<String, QueryError> { Ok(cursor.encode(self.codec.as_ref())?) }

    pub fn decode_cursor(&self, token: &str) -> Result<Cursor, QueryError> { Ok(Cursor::decode(self.codec.as_ref(), token)?) }

    /// Refresh shadow fields and the freshness stamp, then write through to storage.
    #[cfg_attr(feature = "instrument", tracing::instrument(level = "debug", skip_all, fields(collection = %self.name(), id = %document.id)))]
    pub async fn save(&self, mut document: Document) -> Result<Document, MutationError> {
        self.prepare(&mut document)?;
        self.storage.set_document(document.clone()).await?;
        Ok(document)
    }

    /// Save a batch. Every document is checked before any is written.
    pub async fn create(&self, mut documents: Vec<Document>) -> Result<Vec<Document>, MutationError> {
        for document in documents.iter_mut() {
            self.prepare(document)?;
        }
        self.storage.set_documents(documents.clone()).await?;
        debug!("Collection::create {}: {} documents", self.name(), documents.len());
        Ok(documents)
    }

    /// Apply `patch` to every document matching `criteria` and save each. Returns how many were updated.
    pub async fn update(&self, criteria: impl Into<Criteria>, patch: Fields) -> Result<usize, MutationError> {
        let matching = self.find(criteria)?.exec().await?;
        let count = matching.len();
        for mut document in matching.data {
            document.merge(&patch);
            self.save(document).await?;
        }
        debug!("Collection::update {}: {} documents", self.name(), count);
        Ok(count)
    }

    fn prepare(&self, document: &mut Document) -> Result<(), MutationError> {
        self.check_types(document)?;
        self.sync_shadows(document)?;
        document.set(self.catalog.freshness_field(), Utc::now());
        Ok(())
    }

    // Declared fields hold their declared type or null; undeclared fields are stored as given.
    fn check_types(&self, document: &Document) -> Result<(), MutationError> {
        for (name, value) in &document.fields {
            let (Some(field), Some(value)) = (self.catalog.field(name), value) else { continue };
            if !field.field_type.accepts(value.value_type()) {
                return Err(MutationError::FieldType { field: name.clone(), expected: field.field_type, found: value.value_type() });
            }
        }
        Ok(())
    }

    fn sync_shadows(&self, document: &mut Document) -> Result<(), MutationError> {
        for (source, shadow) in self.catalog.shadow_fields() {
            let lowered = match document.get(source) {
                None => None,
                Some(None) => Some(None),
                Some(Some(value)) => {
                    let lowered = value.to_lowercase().ok_or_else(|| MutationError::TypeCoercion { field: source.to_string(), found: value.value_type() })?;
                    Some(Some(lowered))
                }
            };
            match lowered {
                None => {
                    document.unset(shadow);
                }
                Some(value) => {
                    document.fields.insert(shadow.to_string(), value);
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_struct("Collection").field("name", &self.name()).finish() }
}
