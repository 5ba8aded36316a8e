use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "order_by.pest"]
pub struct OrderByParser;
