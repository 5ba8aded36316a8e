use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    EntityId(Ulid),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identifier {
    Property(String),
}

impl Identifier {
    pub fn property(name: impl Into<String>) -> Self { Identifier::Property(name.into()) }

    pub fn name(&self) -> &str {
        match self {
            Identifier::Property(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Comparison { left: Box<Expr>, operator: ComparisonOperator, right: Box<Expr> },
    IsNull(Box<Expr>),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
    True,
    False,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,              // =
    NotEqual,           // <>
    GreaterThan,        // >
    GreaterThanOrEqual, // >=
    LessThan,           // <
    LessThanOrEqual,    // <=
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn is_desc(&self) -> bool { matches!(self, OrderDirection::Desc) }

    pub fn reversed(self) -> Self {
        match self {
            OrderDirection::Asc => OrderDirection::Desc,
            OrderDirection::Desc => OrderDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByItem {
    pub identifier: Identifier,
    pub direction: OrderDirection,
}

impl OrderByItem {
    pub fn new(name: impl Into<String>, direction: OrderDirection) -> Self {
        Self { identifier: Identifier::property(name), direction }
    }
}

/// A complete storage request: which rows, in what order, how many, and which fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub predicate: Predicate,
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<u64>,
    /// `None` returns every stored field.
    pub fields: Option<Vec<String>>,
}

impl Selection {
    pub fn new(predicate: Predicate) -> Self { Self { predicate, order_by: Vec::new(), limit: None, fields: None } }
}

impl Predicate {
    pub fn comparison(field: impl Into<String>, operator: ComparisonOperator, literal: Literal) -> Self {
        Predicate::Comparison {
            left: Box::new(Expr::Identifier(Identifier::property(field))),
            operator,
            right: Box::new(Expr::Literal(literal)),
        }
    }

    pub fn equals(field: impl Into<String>, literal: Literal) -> Self { Self::comparison(field, ComparisonOperator::Equal, literal) }

    pub fn greater_than(field: impl Into<String>, literal: Literal) -> Self { Self::comparison(field, ComparisonOperator::GreaterThan, literal) }

    pub fn less_than(field: impl Into<String>, literal: Literal) -> Self { Self::comparison(field, ComparisonOperator::LessThan, literal) }

    pub fn is_null(field: impl Into<String>) -> Self { Predicate::IsNull(Box::new(Expr::Identifier(Identifier::property(field)))) }

    pub fn is_not_null(field: impl Into<String>) -> Self { Predicate::Not(Box::new(Self::is_null(field))) }

    /// Conjunction that folds away `TRUE` operands.
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::True, p) | (p, Predicate::True) => p,
            (a, b) => Predicate::And(Box::new(a), Box::new(b)),
        }
    }

    pub fn or(self, other: Predicate) -> Predicate { Predicate::Or(Box::new(self), Box::new(other)) }

    /// AND of every predicate, `TRUE` when there are none.
    pub fn conjunction(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
        predicates.into_iter().fold(Predicate::True, Predicate::and)
    }

    /// OR of every predicate, `None` when there are none.
    pub fn disjunction(predicates: impl IntoIterator<Item = Predicate>) -> Option<Predicate> {
        predicates.into_iter().reduce(Predicate::or)
    }
}
