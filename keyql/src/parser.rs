use crate::ast;
use crate::error::ParseError;
use crate::grammar;
use pest::iterators::Pair;
use pest::Parser;

/// Parse compact ORDER BY text (`"fn,-ln, +ph"`) into order-by items.
/// A bare or `+` prefixed name sorts ascending, a `-` prefixed name sorts descending.
pub fn parse_order_by(input: &str) -> Result<Vec<ast::OrderByItem>, ParseError> {
    let pairs = grammar::OrderByParser::parse(grammar::Rule::OrderBy, input)?;

    let mut items = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            grammar::Rule::Clause => items.push(parse_clause(pair)?),
            grammar::Rule::EOI => break,
            other => return Err(ParseError::UnexpectedRule { expected: "Clause", got: other }),
        }
    }

    if items.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    Ok(items)
}

fn parse_clause(pair: Pair<grammar::Rule>) -> Result<ast::OrderByItem, ParseError> {
    let mut direction = ast::OrderDirection::Asc;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            grammar::Rule::Asc => direction = ast::OrderDirection::Asc,
            grammar::Rule::Desc => direction = ast::OrderDirection::Desc,
            grammar::Rule::Identifier => return Ok(ast::OrderByItem::new(inner.as_str(), direction)),
            other => return Err(ParseError::UnexpectedRule { expected: "Identifier", got: other }),
        }
    }
    Err(ParseError::EmptyExpression)
}
