use crate::collation::collate;
use crate::cursor::Cursor;
use crate::document::Document;
use crate::schema::Catalog;
use crate::value::Value;
use std::cmp::Ordering;

/// One page of results with the cursors and freshness watermarks of its rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub data: Vec<Document>,
    pub first_cursor: Option<Cursor>,
    pub last_cursor: Option<Cursor>,
    pub freshest: Option<Value>,
    pub stalest: Option<Value>,
}

impl Page {
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    pub fn len(&self) -> usize { self.data.len() }

    pub fn first(&self) -> Option<&Document> { self.data.first() }
}

/// Wrap `rows` without reordering or filtering them.
pub fn build(rows: Vec<Document>, catalog: &Catalog) -> Page {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else { return Page::default() };
    let first_cursor = Some(Cursor::capture(first, catalog));
    let last_cursor = Some(Cursor::capture(last, catalog));

    let freshness = catalog.freshness_field();
    let (freshest, stalest) = rows.iter().filter_map(|row| row.value(freshness)).fold((None, None), |(max, min): (Option<&Value>, Option<&Value>), v| {
        (
            Some(max.filter(|m| collate(m, v) != Ordering::Less).unwrap_or(v)),
            Some(min.filter(|m| collate(m, v) != Ordering::Greater).unwrap_or(v)),
        )
    });

    Page { first_cursor, last_cursor, freshest: freshest.cloned(), stalest: stalest.cloned(), data: rows }
}
