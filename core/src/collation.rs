//! Total ordering over values, with a null sentinel below every defined value.
//!
//! Ranks across types follow a document-store convention: numbers < strings < entity ids < booleans <
//! timestamps. Integers and floats compare numerically with each other.

use crate::value::Value;
use keyql::ast::OrderDirection;
use std::cmp::Ordering;

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::I64(_) | Value::F64(_) => 0,
        Value::String(_) => 1,
        Value::EntityId(_) => 2,
        Value::Bool(_) => 3,
        Value::Timestamp(_) => 4,
    }
}

// Numeric order with -0.0 == 0.0. NaNs fall back to `total_cmp`, which puts them above (or, when
// negative, below) every number.
fn compare_floats(a: f64, b: f64) -> Ordering { a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b)) }

// Exact comparison: converting the integer to f64 would round above 2^53.
fn compare_int_float(int: i64, float: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return if float.is_sign_negative() { Ordering::Greater } else { Ordering::Less };
    }
    if float >= TWO_POW_63 {
        return Ordering::Less;
    }
    if float < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => compare_floats(whole, float),
        other => other,
    }
}

/// Same-family comparison. `None` when the values belong to different type families, which is how
/// typed predicates treat mismatched operands.
pub fn compare_typed(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::I64(a), Value::I64(b)) => Some(a.cmp(b)),
        (Value::F64(a), Value::F64(b)) => Some(compare_floats(*a, *b)),
        (Value::I64(a), Value::F64(b)) => Some(compare_int_float(*a, *b)),
        (Value::F64(a), Value::I64(b)) => Some(compare_int_float(*b, *a).reverse()),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::EntityId(a), Value::EntityId(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

pub fn collate(left: &Value, right: &Value) -> Ordering {
    compare_typed(left, right).unwrap_or_else(|| type_rank(left).cmp(&type_rank(right)))
}

/// `None` is the null sentinel and sorts below every defined value.
pub fn collate_nullable(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => collate(l, r),
    }
}

/// Ordering under a declared direction. Descending reverses the whole order, nulls included.
pub fn collate_directed(left: Option<&Value>, right: Option<&Value>, direction: OrderDirection) -> Ordering {
    let ordering = collate_nullable(left, right);
    match direction {
        OrderDirection::Asc => ordering,
        OrderDirection::Desc => ordering.reverse(),
    }
}
