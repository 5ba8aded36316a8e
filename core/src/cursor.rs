use crate::codec::{CursorError, TokenCodec};
use crate::document::Document;
use crate::id::EntityId;
use crate::schema::Catalog;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of one row's sortable values, used to resume iteration after (or before) that row.
///
/// Every sortable field of the catalog is captured, not only the fields of the current sort, so a
/// cursor stays usable when the caller re-sorts over the same collection. Null and undefined source
/// values are both stored as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    id: EntityId,
    #[serde(default)]
    freshness: Option<Value>,
    fields: BTreeMap<String, Option<Value>>,
}

impl Cursor {
    pub fn new(id: EntityId) -> Self { Self { id, freshness: None, fields: BTreeMap::new() } }

    pub fn with(mut self, field: impl Into<String>, value: Option<Value>) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn with_freshness(mut self, freshness: Option<Value>) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn capture(document: &Document, catalog: &Catalog) -> Cursor {
        let fields = catalog.sortable_fields().map(|f| (f.name.clone(), document.value(&f.name).cloned())).collect();
        Cursor { id: document.id, freshness: document.value(catalog.freshness_field()).cloned(), fields }
    }

    pub fn id(&self) -> EntityId { self.id }

    pub fn freshness(&self) -> Option<&Value> { self.freshness.as_ref() }

    /// Outer `None` when the field was not captured, inner `None` for the null sentinel.
    pub fn get(&self, field: &str) -> Option<Option<&Value>> { self.fields.get(field).map(Option::as_ref) }

    pub fn value(&self, field: &str) -> Option<&Value> { self.fields.get(field).and_then(Option::as_ref) }

    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Value>)> { self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref())) }

    pub fn encode(&self, codec: &dyn TokenCodec) -> Result<String, CursorError> { codec.encode(self) }

    pub fn decode(codec: &dyn TokenCodec, token: &str) -> Result<Cursor, CursorError> { codec.decode(token) }
}
