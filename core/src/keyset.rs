//! Keyset predicate compiler.
//!
//! For sort keys `k1..kn` (with the id tie-break as the last key) and a cursor row `c`, rows strictly
//! after `c` are those matching
//!
//! ```text
//! (k1 > c.k1) OR (k1 = c.k1 AND k2 > c.k2) OR ... OR (k1 = c.k1 AND ... AND id > c.id)
//! ```
//!
//! where `>` is taken in each key's declared direction, and flipped for rows strictly before `c`.
//! Null sorts below every defined value, so a forward comparison against a null cursor value is
//! `IS NOT NULL`, a backward comparison against a defined value also admits nulls, and a backward
//! comparison against null matches nothing and its disjunct is left out.

use crate::codec::CursorError;
use crate::cursor::Cursor;
use crate::sort::{SortKey, SortSpec};
use crate::value::Value;
use keyql::ast::{Literal, OrderDirection, Predicate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    After,
    Before,
}

/// Range predicate selecting the rows strictly after or before `cursor` in `spec` order.
pub fn compile(spec: &SortSpec, cursor: &Cursor, direction: Direction, id_field: &str) -> Result<Predicate, CursorError> {
    let (disjuncts, _) = spec.with_tie_break(id_field).iter().try_fold((Vec::new(), Predicate::True), |(mut disjuncts, prefix), key| {
        let value = cursor_value(cursor, key, id_field)?;
        let nullable = key.field != id_field;
        if let Some(comparison) = comparator(key, value.as_ref(), direction, nullable) {
            disjuncts.push(prefix.clone().and(comparison));
        }
        Ok::<_, CursorError>((disjuncts, prefix.and(equality(key, value.as_ref()))))
    })?;

    // The id key is never null, so its disjunct always survives.
    Ok(Predicate::disjunction(disjuncts).unwrap_or(Predicate::False))
}

/// Cursor value for `key`, lower-cased when the key compares on a shadow field.
fn cursor_value(cursor: &Cursor, key: &SortKey, id_field: &str) -> Result<Option<Value>, CursorError> {
    if key.field == id_field {
        return Ok(Some(Value::EntityId(cursor.id())));
    }
    let value = cursor.get(&key.field).ok_or_else(|| CursorError::MissingField(key.field.clone()))?;
    Ok(value.map(|v| if key.case_insensitive { v.to_lowercase().unwrap_or_else(|| v.clone()) } else { v.clone() }))
}

fn comparator(key: &SortKey, value: Option<&Value>, direction: Direction, nullable: bool) -> Option<Predicate> {
    let forward = (key.direction == OrderDirection::Asc) == (direction == Direction::After);
    let field = key.physical.as_str();
    match (forward, value) {
        (true, Some(v)) => Some(Predicate::greater_than(field, Literal::from(v))),
        (true, None) => Some(Predicate::is_not_null(field)),
        (false, Some(v)) if nullable => Some(Predicate::less_than(field, Literal::from(v)).or(Predicate::is_null(field))),
        (false, Some(v)) => Some(Predicate::less_than(field, Literal::from(v))),
        (false, None) => None,
    }
}

fn equality(key: &SortKey, value: Option<&Value>) -> Predicate {
    match value {
        Some(v) => Predicate::equals(key.physical.as_str(), Literal::from(v)),
        None => Predicate::is_null(key.physical.as_str()),
    }
}
