use crate::collection::Collection;
use crate::criteria::Criteria;
use crate::cursor::Cursor;
use crate::envelope::{self, Page};
use crate::error::QueryError;
use crate::keyset::{self, Direction};
use crate::sort::{SortInput, SortSpec};
use chrono::{DateTime, Utc};
use keyql::ast::{Literal, Predicate, Selection};
use tracing::debug;

/// A pending query against one collection. Built up by value, compiled by `selection`, run by `exec`.
#[derive(Clone)]
pub struct Query {
    collection: Collection,
    criteria: Criteria,
    sort: SortSpec,
    limit: Option<u64>,
    fields: Option<Vec<String>>,
    bounds: Vec<(Direction, Cursor)>,
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
}

impl Query {
    /// `criteria` must already be rewritten against the collection's catalog.
    pub(crate) fn new(collection: Collection, criteria: Criteria) -> Self {
        Self { collection, criteria, sort: SortSpec::default(), limit: None, fields: None, bounds: Vec::new(), since: None, until: None }
    }

    pub fn sort(mut self, spec: impl Into<SortInput>) -> Result<Self, QueryError> {
        self.sort = SortSpec::parse(self.collection.catalog(), spec)?;
        Ok(self)
    }

    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn after(mut self, cursor: Cursor) -> Self {
        self.bounds.push((Direction::After, cursor));
        self
    }

    pub fn before(mut self, cursor: Cursor) -> Self {
        self.bounds.push((Direction::Before, cursor));
        self
    }

    pub fn after_token(self, token: &str) -> Result<Self, QueryError> {
        let cursor = self.collection.decode_cursor(token)?;
        Ok(self.after(cursor))
    }

    pub fn before_token(self, token: &str) -> Result<Self, QueryError> {
        let cursor = self.collection.decode_cursor(token)?;
        Ok(self.before(cursor))
    }

    /// Only rows updated strictly after `timestamp`.
    pub fn since(mut self, timestamp: DateTime<Utc>) -> Self {
        self.since = Some(timestamp);
        self
    }

    /// Only rows updated strictly before `timestamp`.
    pub fn until(mut self, timestamp: DateTime<Utc>) -> Self {
        self.until = Some(timestamp);
        self
    }

    pub fn sort_spec(&self) -> &SortSpec { &self.sort }

    // With only `before` bounds the rows nearest the cursor come first in reverse order.
    fn is_reversed(&self) -> bool { !self.bounds.is_empty() && self.bounds.iter().all(|(direction, _)| *direction == Direction::Before) }

    /// Compile into the selection handed to storage. Performs no I/O.
    pub fn selection(&self) -> Result<Selection, QueryError> {
        let catalog = self.collection.catalog();
        let id_field = catalog.id_field();
        let freshness = catalog.freshness_field();

        let mut predicate = self.criteria.to_predicate(id_field);
        for (direction, cursor) in &self.bounds {
            predicate = predicate.and(keyset::compile(&self.sort, cursor, *direction, id_field)?);
        }
        if let Some(since) = self.since {
            predicate = predicate.and(Predicate::greater_than(freshness, Literal::Timestamp(since)));
        }
        if let Some(until) = self.until {
            predicate = predicate.and(Predicate::less_than(freshness, Literal::Timestamp(until)));
        }

        // Storage must return every sortable value so cursors can be captured before projection.
        let fields = self.fields.as_ref().map(|selected| {
            let mut fields = selected.clone();
            for field in catalog.sortable_fields() {
                if !fields.contains(&field.name) {
                    fields.push(field.name.clone());
                }
            }
            fields
        });

        let selection = Selection { predicate, order_by: self.sort.order_by(id_field, self.is_reversed()), limit: self.limit, fields };
        debug!("Query::selection {}: {}", catalog.name(), selection);
        Ok(selection)
    }

    #[cfg_attr(feature = "instrument", tracing::instrument(level = "debug", skip_all, fields(collection = %self.collection.name())))]
    pub async fn exec(self) -> Result<Page, QueryError> {
        let selection = self.selection()?;
        let mut rows = self.collection.storage().fetch(&selection).await?;
        if self.is_reversed() {
            rows.reverse();
        }
        debug!("Query::exec {}: {} rows", self.collection.name(), rows.len());

        let mut page = envelope::build(rows, self.collection.catalog());
        if let Some(fields) = &self.fields {
            page.data = page.data.iter().map(|row| row.project(fields)).collect();
        }
        Ok(page)
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("collection", &self.collection.name())
            .field("criteria", &self.criteria)
            .field("sort", &self.sort)
            .field("limit", &self.limit)
            .field("bounds", &self.bounds.len())
            .finish()
    }
}
