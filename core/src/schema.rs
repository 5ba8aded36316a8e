//! Field declarations and the resolved per-collection catalog.
//!
//! Case behavior is resolved once, at registration: every sortable string field ends up either
//! case-sensitive (compared on its own value) or case-insensitive (compared on a lower-cased shadow
//! field written alongside it).

use crate::config::CollectionConfig;
use crate::error::SchemaError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use crate::value::ValueType as FieldType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseSensitivity {
    /// Follow the collection's `ignore_case` default.
    #[default]
    Inherit,
    Sensitive,
    Insensitive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub sortable: bool,
    pub case: CaseSensitivity,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self { name: name.into(), field_type, sortable: false, case: CaseSensitivity::Inherit }
    }

    pub fn string(name: impl Into<String>) -> Self { Self::new(name, FieldType::String) }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case = CaseSensitivity::Sensitive;
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case = CaseSensitivity::Insensitive;
        self
    }
}

/// Declared fields of one entity type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), fields: Vec::new() } }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    pub field_type: FieldType,
    pub sortable: bool,
    pub case_insensitive: bool,
    /// Name compared and sorted on: the shadow when there is one.
    pub physical: String,
    pub shadow: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    config: CollectionConfig,
    fields: IndexMap<String, ResolvedField>,
    indexed: Vec<String>,
}

impl Catalog {
    pub fn register(schema: Schema, config: CollectionConfig) -> Result<Catalog, SchemaError> {
        let mut declared: IndexMap<String, FieldDescriptor> = IndexMap::new();
        for field in schema.fields {
            if field.name == config.id_field {
                return Err(SchemaError::ReservedField(field.name));
            }
            if declared.contains_key(&field.name) {
                return Err(SchemaError::DuplicateField(field.name));
            }
            declared.insert(field.name.clone(), field);
        }

        let freshness = declared
            .entry(config.updated_field.clone())
            .or_insert_with(|| FieldDescriptor::new(config.updated_field.clone(), FieldType::Timestamp));
        if freshness.field_type != FieldType::Timestamp {
            return Err(SchemaError::FreshnessType { field: freshness.name.clone(), found: freshness.field_type });
        }
        freshness.sortable = true;

        let mut fields = IndexMap::with_capacity(declared.len());
        let mut indexed = Vec::new();
        for (name, descriptor) in declared.iter() {
            let case_insensitive = descriptor.sortable && resolve_case(descriptor, &config);
            let shadow = case_insensitive.then(|| config.shadow_name(name));
            if let Some(shadow) = &shadow {
                if let Some(collision) = declared.keys().find(|other| *other == shadow) {
                    return Err(SchemaError::ShadowCollision { field: collision.clone(), source_field: name.clone() });
                }
            }
            let physical = shadow.clone().unwrap_or_else(|| name.clone());
            if descriptor.sortable {
                indexed.push(physical.clone());
            }
            fields.insert(
                name.clone(),
                ResolvedField {
                    name: name.clone(),
                    field_type: descriptor.field_type,
                    sortable: descriptor.sortable,
                    case_insensitive,
                    physical,
                    shadow,
                },
            );
        }

        debug!("Catalog::register {}: {} fields, indexed {:?}", schema.name, fields.len(), indexed);
        Ok(Catalog { name: schema.name, config, fields, indexed })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn config(&self) -> &CollectionConfig { &self.config }

    pub fn id_field(&self) -> &str { &self.config.id_field }

    pub fn freshness_field(&self) -> &str { &self.config.updated_field }

    pub fn field(&self, name: &str) -> Option<&ResolvedField> { self.fields.get(name) }

    pub fn fields(&self) -> impl Iterator<Item = &ResolvedField> { self.fields.values() }

    pub fn is_sortable(&self, field: &str) -> bool { field == self.id_field() || self.fields.get(field).is_some_and(|f| f.sortable) }

    pub fn is_case_insensitive(&self, field: &str) -> bool { self.fields.get(field).is_some_and(|f| f.case_insensitive) }

    /// Name used on the storage side. Unknown fields map to themselves.
    pub fn physical_name<'a>(&'a self, field: &'a str) -> &'a str { self.fields.get(field).map_or(field, |f| f.physical.as_str()) }

    /// `(source, shadow)` pairs.
    pub fn shadow_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.values().filter_map(|f| f.shadow.as_deref().map(|shadow| (f.name.as_str(), shadow)))
    }

    pub fn indexed_fields(&self) -> &[String] { &self.indexed }

    /// Declared sortable fields, id excluded.
    pub fn sortable_fields(&self) -> impl Iterator<Item = &ResolvedField> { self.fields.values().filter(|f| f.sortable) }
}

fn resolve_case(field: &FieldDescriptor, config: &CollectionConfig) -> bool {
    if field.name == config.updated_field || field.field_type != FieldType::String {
        return false;
    }
    match field.case {
        CaseSensitivity::Sensitive => false,
        CaseSensitivity::Insensitive => true,
        CaseSensitivity::Inherit => config.ignore_case,
    }
}
