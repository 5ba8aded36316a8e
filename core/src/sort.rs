use crate::error::QueryError;
use crate::schema::Catalog;
use keyql::ast::{OrderByItem, OrderDirection};
use keyql::parser::parse_order_by;
use std::collections::HashSet;

/// A sort as callers supply it: structured pairs, or compact text such as `"fn,-ln, +ph"`.
#[derive(Debug, Clone, PartialEq)]
pub enum SortInput {
    Pairs(Vec<(String, OrderDirection)>),
    Text(String),
}

impl From<&str> for SortInput {
    fn from(text: &str) -> Self { SortInput::Text(text.to_string()) }
}

impl From<String> for SortInput {
    fn from(text: String) -> Self { SortInput::Text(text) }
}

impl From<Vec<(String, OrderDirection)>> for SortInput {
    fn from(pairs: Vec<(String, OrderDirection)>) -> Self { SortInput::Pairs(pairs) }
}

impl From<Vec<(&str, OrderDirection)>> for SortInput {
    fn from(pairs: Vec<(&str, OrderDirection)>) -> Self { SortInput::Pairs(pairs.into_iter().map(|(f, d)| (f.to_string(), d)).collect()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Declared name, used to read cursor values.
    pub field: String,
    /// Name compared on storage.
    pub physical: String,
    pub direction: OrderDirection,
    pub case_insensitive: bool,
}

/// Validated sort keys in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn parse(catalog: &Catalog, input: impl Into<SortInput>) -> Result<SortSpec, QueryError> {
        let pairs: Vec<(String, OrderDirection)> = match input.into() {
            SortInput::Pairs(pairs) => pairs,
            SortInput::Text(text) => {
                parse_order_by(&text)?.into_iter().map(|OrderByItem { identifier, direction }| (identifier.name().to_string(), direction)).collect()
            }
        };

        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(pairs.len());
        for (field, direction) in pairs {
            if !catalog.is_sortable(&field) || !seen.insert(field.clone()) {
                return Err(QueryError::InvalidSortField(field));
            }
            keys.push(SortKey {
                physical: catalog.physical_name(&field).to_string(),
                case_insensitive: catalog.is_case_insensitive(&field),
                field,
                direction,
            });
        }
        Ok(SortSpec { keys })
    }

    pub fn keys(&self) -> &[SortKey] { &self.keys }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Declared keys followed by the `(id, asc)` tie-break, unless the id is already listed.
    pub fn with_tie_break(&self, id_field: &str) -> Vec<SortKey> {
        let mut keys = self.keys.clone();
        if !keys.iter().any(|k| k.field == id_field) {
            keys.push(SortKey { field: id_field.to_string(), physical: id_field.to_string(), direction: OrderDirection::Asc, case_insensitive: false });
        }
        keys
    }

    /// Physical order handed to storage. `flip` reverses every direction.
    pub fn order_by(&self, id_field: &str, flip: bool) -> Vec<OrderByItem> {
        self.with_tie_break(id_field)
            .into_iter()
            .map(|key| OrderByItem::new(key.physical, if flip { key.direction.reversed() } else { key.direction }))
            .collect()
    }
}
