use crate::grammar;
use thiserror::Error;

/// Errors raised while parsing compact ORDER BY text
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    SyntaxError(String),
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Expected {expected}, got {got:?}")]
    UnexpectedRule { expected: &'static str, got: grammar::Rule },
}

impl From<pest::error::Error<grammar::Rule>> for ParseError {
    fn from(err: pest::error::Error<grammar::Rule>) -> Self { ParseError::SyntaxError(err.to_string()) }
}

/// Errors raised while rendering a selection as SQL
#[derive(Debug, Error, PartialEq)]
pub enum SqlGenerationError {
    #[error("Unsupported literal: {0}")]
    UnsupportedLiteral(&'static str),
}
