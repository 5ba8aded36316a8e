use crate::document::Fields;
use crate::error::QueryError;
use crate::id::EntityId;
use crate::schema::Catalog;
use crate::value::Value;
use keyql::ast::{Literal, Predicate};

/// Equality filter supplied by callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Criteria {
    All,
    Id(EntityId),
    /// Every listed field must equal its value; `None` matches null or undefined.
    Match(Fields),
}

impl Criteria {
    pub fn all() -> Self { Criteria::All }

    pub fn id(id: EntityId) -> Self { Criteria::Id(id) }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self { self.with(field.into(), Some(value.into())) }

    pub fn is_null(self, field: impl Into<String>) -> Self { self.with(field.into(), None) }

    fn with(self, field: String, value: Option<Value>) -> Self {
        let mut fields = match self {
            Criteria::Match(fields) => fields,
            Criteria::All | Criteria::Id(_) => Fields::new(),
        };
        fields.insert(field, value);
        Criteria::Match(fields)
    }

    /// Point criteria at shadow fields wherever the catalog compares case-insensitively.
    pub fn rewrite(self, catalog: &Catalog) -> Result<Criteria, QueryError> {
        let fields = match self {
            Criteria::Match(fields) => fields,
            other => return Ok(other),
        };

        let mut rewritten = Fields::new();
        for (field, value) in fields {
            match catalog.field(&field).and_then(|f| f.shadow.as_ref()) {
                Some(shadow) => {
                    let lowered = match value {
                        None => None,
                        Some(v) => Some(v.to_lowercase().ok_or_else(|| QueryError::TypeCoercion { field: field.clone(), found: v.value_type() })?),
                    };
                    rewritten.insert(shadow.clone(), lowered);
                }
                None => {
                    rewritten.insert(field, value);
                }
            }
        }
        Ok(Criteria::Match(rewritten))
    }

    pub fn to_predicate(&self, id_field: &str) -> Predicate {
        match self {
            Criteria::All => Predicate::True,
            Criteria::Id(id) => Predicate::equals(id_field, Literal::EntityId(id.to_ulid())),
            Criteria::Match(fields) => Predicate::conjunction(fields.iter().map(|(field, value)| match value {
                Some(v) => Predicate::equals(field.as_str(), Literal::from(v)),
                None => Predicate::is_null(field.as_str()),
            })),
        }
    }
}

impl From<EntityId> for Criteria {
    fn from(id: EntityId) -> Self { Criteria::Id(id) }
}

impl From<Fields> for Criteria {
    fn from(fields: Fields) -> Self { Criteria::Match(fields) }
}
