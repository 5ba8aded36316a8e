use crate::id::EntityId;
use crate::selection::filter::Filterable;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field values keyed by name. A key mapped to `None` is an explicit null; an absent key is undefined.
pub type Fields = BTreeMap<String, Option<Value>>;

/// A stored row: an id plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: EntityId,
    pub fields: Fields,
}

impl Document {
    pub fn new() -> Self { Self::with_id(EntityId::new()) }

    pub fn with_id(id: EntityId) -> Self { Self { id, fields: Fields::new() } }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn with_null(mut self, field: impl Into<String>) -> Self {
        self.set_null(field);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) { self.fields.insert(field.into(), Some(value.into())); }

    pub fn set_null(&mut self, field: impl Into<String>) { self.fields.insert(field.into(), None); }

    pub fn unset(&mut self, field: &str) -> Option<Option<Value>> { self.fields.remove(field) }

    /// Outer `None` when the field is undefined, inner `None` when it is null.
    pub fn get(&self, field: &str) -> Option<Option<&Value>> { self.fields.get(field).map(Option::as_ref) }

    /// Null and undefined both read as `None`.
    pub fn value(&self, field: &str) -> Option<&Value> { self.fields.get(field).and_then(Option::as_ref) }

    /// Overwrite fields from `patch`, keeping everything it does not mention.
    pub fn merge(&mut self, patch: &Fields) {
        for (field, value) in patch {
            self.fields.insert(field.clone(), value.clone());
        }
    }

    /// Copy holding only the named fields. The id is always kept.
    pub fn project(&self, fields: &[String]) -> Document {
        let fields = self.fields.iter().filter(|(name, _)| fields.contains(name)).map(|(k, v)| (k.clone(), v.clone())).collect();
        Document { id: self.id, fields }
    }
}

impl Default for Document {
    fn default() -> Self { Self::new() }
}

/// A document read through its collection's id field name, so predicates and sorts can address the id.
#[derive(Debug, Clone)]
pub struct KeyedDocument {
    pub document: Document,
    id_field: Arc<str>,
}

impl KeyedDocument {
    pub fn new(document: Document, id_field: Arc<str>) -> Self { Self { document, id_field } }

    pub fn into_document(self) -> Document { self.document }
}

impl Filterable for KeyedDocument {
    fn value(&self, name: &str) -> Option<Value> {
        if name == &*self.id_field {
            Some(Value::EntityId(self.document.id))
        } else {
            self.document.value(name).cloned()
        }
    }
}
