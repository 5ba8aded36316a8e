use crate::id::EntityId;
use chrono::{DateTime, Utc};
use keyql::ast::Literal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    EntityId(EntityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    String,
    I64,
    F64,
    Bool,
    Timestamp,
    EntityId,
}

impl ValueType {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::String(_) => ValueType::String,
            Value::I64(_) => ValueType::I64,
            Value::F64(_) => ValueType::F64,
            Value::Bool(_) => ValueType::Bool,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::EntityId(_) => ValueType::EntityId,
        }
    }

    pub fn is_numeric(&self) -> bool { matches!(self, ValueType::I64 | ValueType::F64) }

    /// Whether a field declared as `self` may hold a value of type `found`. Integers and floats
    /// are interchangeable.
    pub fn accepts(&self, found: ValueType) -> bool { *self == found || (self.is_numeric() && found.is_numeric()) }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::I64 => "i64",
            ValueType::F64 => "f64",
            ValueType::Bool => "bool",
            ValueType::Timestamp => "timestamp",
            ValueType::EntityId => "entity id",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType { ValueType::of(self) }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Lower-cased copy for shadow fields. `None` for anything that is not a string.
    pub fn to_lowercase(&self) -> Option<Value> { self.as_str().map(|s| Value::String(s.to_lowercase())) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::I64(i) => write!(f, "{}", i),
            Value::F64(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Value::EntityId(id) => write!(f, "{}", id),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Value {
        match literal {
            Literal::String(s) => Value::String(s),
            Literal::I64(i) => Value::I64(i),
            Literal::F64(f) => Value::F64(f),
            Literal::Bool(b) => Value::Bool(b),
            Literal::Timestamp(ts) => Value::Timestamp(ts),
            Literal::EntityId(ulid) => Value::EntityId(EntityId::from_ulid(ulid)),
        }
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Literal {
        match value {
            Value::String(s) => Literal::String(s),
            Value::I64(i) => Literal::I64(i),
            Value::F64(f) => Literal::F64(f),
            Value::Bool(b) => Literal::Bool(b),
            Value::Timestamp(ts) => Literal::Timestamp(ts),
            Value::EntityId(id) => Literal::EntityId(id.to_ulid()),
        }
    }
}

impl From<&Value> for Literal {
    fn from(value: &Value) -> Literal { value.clone().into() }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_string()) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::I64(i) }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::I64(i as i64) }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::F64(f) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self { Value::Timestamp(ts) }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self { Value::EntityId(id) }
}
