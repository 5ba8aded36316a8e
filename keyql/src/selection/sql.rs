//! Render selections as SQL text. SQL-backed storage engines use this directly; everything else
//! uses it for `Display` so compiled keyset predicates can be read in logs and assertions.

use crate::ast::{ComparisonOperator, Expr, Identifier, Literal, OrderByItem, OrderDirection, Predicate, Selection};
use crate::error::SqlGenerationError;
use base64::{engine::general_purpose, Engine as _};
use std::fmt;

fn generate_identifier_sql(id: &Identifier, buffer: &mut String) {
    match id {
        Identifier::Property(name) => {
            buffer.push('"');
            buffer.push_str(&name.replace('"', "\"\""));
            buffer.push('"');
        }
    }
}

fn generate_literal_sql(lit: &Literal, buffer: &mut String) -> Result<(), SqlGenerationError> {
    match lit {
        Literal::I64(i) => buffer.push_str(&i.to_string()),
        Literal::F64(f) => {
            if !f.is_finite() {
                return Err(SqlGenerationError::UnsupportedLiteral("non-finite float"));
            }
            buffer.push_str(&f.to_string());
        }
        Literal::Bool(b) => buffer.push_str(if *b { "true" } else { "false" }),
        Literal::String(s) => {
            buffer.push('\'');
            for c in s.chars() {
                match c {
                    '\'' => buffer.push_str("''"),
                    // Null bytes truncate strings in C-based drivers
                    '\0' => continue,
                    _ => buffer.push(c),
                }
            }
            buffer.push('\'');
        }
        Literal::Timestamp(ts) => {
            buffer.push('\'');
            buffer.push_str(&ts.to_rfc3339());
            buffer.push('\'');
        }
        Literal::EntityId(ulid) => {
            buffer.push('\'');
            buffer.push_str(&general_purpose::URL_SAFE_NO_PAD.encode(ulid.to_bytes()));
            buffer.push('\'');
        }
    }
    Ok(())
}

fn generate_expr_sql(expr: &Expr, buffer: &mut String) -> Result<(), SqlGenerationError> {
    match expr {
        Expr::Literal(lit) => generate_literal_sql(lit, buffer),
        Expr::Identifier(id) => {
            generate_identifier_sql(id, buffer);
            Ok(())
        }
    }
}

fn comparison_op_to_sql(op: &ComparisonOperator) -> &'static str {
    match op {
        ComparisonOperator::Equal => "=",
        ComparisonOperator::NotEqual => "<>",
        ComparisonOperator::GreaterThan => ">",
        ComparisonOperator::GreaterThanOrEqual => ">=",
        ComparisonOperator::LessThan => "<",
        ComparisonOperator::LessThanOrEqual => "<=",
    }
}

pub fn generate_predicate_sql(predicate: &Predicate) -> Result<String, SqlGenerationError> {
    let mut buffer = String::new();
    generate_predicate_sql_inner(predicate, &mut buffer)?;
    Ok(buffer)
}

fn generate_predicate_sql_inner(predicate: &Predicate, buffer: &mut String) -> Result<(), SqlGenerationError> {
    match predicate {
        Predicate::Comparison { left, operator, right } => {
            generate_expr_sql(left, buffer)?;
            buffer.push(' ');
            buffer.push_str(comparison_op_to_sql(operator));
            buffer.push(' ');
            generate_expr_sql(right, buffer)?;
        }
        Predicate::And(left, right) => {
            generate_predicate_sql_inner(left, buffer)?;
            buffer.push_str(" AND ");
            generate_predicate_sql_inner(right, buffer)?;
        }
        Predicate::Or(left, right) => {
            buffer.push('(');
            generate_predicate_sql_inner(left, buffer)?;
            buffer.push_str(" OR ");
            generate_predicate_sql_inner(right, buffer)?;
            buffer.push(')');
        }
        Predicate::Not(inner) => match inner.as_ref() {
            Predicate::IsNull(expr) => {
                generate_expr_sql(expr, buffer)?;
                buffer.push_str(" IS NOT NULL");
            }
            other => {
                buffer.push_str("NOT (");
                generate_predicate_sql_inner(other, buffer)?;
                buffer.push(')');
            }
        },
        Predicate::IsNull(expr) => {
            generate_expr_sql(expr, buffer)?;
            buffer.push_str(" IS NULL");
        }
        Predicate::True => buffer.push_str("TRUE"),
        Predicate::False => buffer.push_str("FALSE"),
    }
    Ok(())
}

/// `ORDER BY` clause body, e.g. `"un" ASC, "id" ASC`. Nulls sort lowest, so ascending order puts
/// them first and descending order puts them last.
pub fn generate_order_by_sql(order_by: &[OrderByItem]) -> String {
    let mut buffer = String::new();
    for (i, item) in order_by.iter().enumerate() {
        if i > 0 {
            buffer.push_str(", ");
        }
        generate_identifier_sql(&item.identifier, &mut buffer);
        buffer.push_str(match item.direction {
            OrderDirection::Asc => " ASC NULLS FIRST",
            OrderDirection::Desc => " DESC NULLS LAST",
        });
    }
    buffer
}

/// Everything after `SELECT ... FROM table`.
pub fn generate_selection_sql(selection: &Selection) -> Result<String, SqlGenerationError> {
    let mut sql = format!("WHERE {}", generate_predicate_sql(&selection.predicate)?);
    if !selection.order_by.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&generate_order_by_sql(&selection.order_by));
    }
    if let Some(limit) = selection.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }
    Ok(sql)
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match generate_predicate_sql(self) {
            Ok(sql) => write!(f, "{}", sql),
            Err(e) => write!(f, "<{}>", e),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match generate_selection_sql(self) {
            Ok(sql) => write!(f, "{}", sql),
            Err(e) => write!(f, "<{}>", e),
        }
    }
}
