//! Evaluate predicates against in-memory rows. Storage engines without a query language of their
//! own use this to honor the predicates compiled by queries.
//!
//! Comparisons follow SQL semantics: a null or undefined operand never matches, and operands of
//! different type families never match (integers and floats compare numerically).

use crate::collation::compare_typed;
use crate::value::Value;
use keyql::ast::{ComparisonOperator, Expr, Predicate};
use std::cmp::Ordering;

/// Anything that can supply named values for predicate evaluation and sorting.
/// `None` covers both null and undefined.
pub trait Filterable {
    fn value(&self, name: &str) -> Option<Value>;
}

fn evaluate_expr<I: Filterable>(item: &I, expr: &Expr) -> Option<Value> {
    match expr {
        Expr::Literal(lit) => Some(lit.clone().into()),
        Expr::Identifier(id) => item.value(id.name()),
    }
}

fn compare(operator: ComparisonOperator, ordering: Ordering) -> bool {
    match operator {
        ComparisonOperator::Equal => ordering == Ordering::Equal,
        ComparisonOperator::NotEqual => ordering != Ordering::Equal,
        ComparisonOperator::GreaterThan => ordering == Ordering::Greater,
        ComparisonOperator::GreaterThanOrEqual => ordering != Ordering::Less,
        ComparisonOperator::LessThan => ordering == Ordering::Less,
        ComparisonOperator::LessThanOrEqual => ordering != Ordering::Greater,
    }
}

pub fn evaluate_predicate<I: Filterable>(item: &I, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Comparison { left, operator, right } => {
            let (Some(left), Some(right)) = (evaluate_expr(item, left), evaluate_expr(item, right)) else { return false };
            compare_typed(&left, &right).is_some_and(|ordering| compare(*operator, ordering))
        }
        Predicate::IsNull(expr) => evaluate_expr(item, expr).is_none(),
        Predicate::And(left, right) => evaluate_predicate(item, left) && evaluate_predicate(item, right),
        Predicate::Or(left, right) => evaluate_predicate(item, left) || evaluate_predicate(item, right),
        Predicate::Not(inner) => !evaluate_predicate(item, inner),
        Predicate::True => true,
        Predicate::False => false,
    }
}
