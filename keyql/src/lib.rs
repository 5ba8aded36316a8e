pub mod ast;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod selection;
