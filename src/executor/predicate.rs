use std::cmp::Ordering;

use crate::{
    storage::schema::ColumnSchema,
    types::{row::Row, value::Value},
};

/// Comparison operators for predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOp {
    pub fn parse(op: &str) -> Option<ComparisonOp> {
        match op {
            "=" => Some(ComparisonOp::Equal),
            "!=" => Some(ComparisonOp::NotEqual),
            "<" => Some(ComparisonOp::LessThan),
            "<=" => Some(ComparisonOp::LessThanOrEqual),
            ">" => Some(ComparisonOp::GreaterThan),
            ">=" => Some(ComparisonOp::GreaterThanOrEqual),
            _ => None,
        }
    }
}

/// Column comparison against a literal: column op value.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column_name: String,
    pub op: String,
    pub value: Value,
}

impl Condition {
    /// Evaluate against a row. Unknown columns, unknown operators, and
    /// incomparable value pairs make the condition false rather than an
    /// error.
    pub fn evaluate(&self, row: &Row, columns: &[ColumnSchema]) -> bool {
        let Some(op) = ComparisonOp::parse(&self.op) else {
            return false;
        };
        let Some(position) = columns
            .iter()
            .position(|column| column.name == self.column_name)
        else {
            return false;
        };
        let Some(row_value) = row.get_value(position) else {
            return false;
        };
        match op {
            ComparisonOp::Equal => row_value == &self.value,
            ComparisonOp::NotEqual => row_value != &self.value,
            _ => match row_value.partial_cmp(&self.value) {
                Some(ordering) => match op {
                    ComparisonOp::LessThan => ordering == Ordering::Less,
                    ComparisonOp::LessThanOrEqual => ordering != Ordering::Greater,
                    ComparisonOp::GreaterThan => ordering == Ordering::Greater,
                    ComparisonOp::GreaterThanOrEqual => ordering != Ordering::Less,
                    ComparisonOp::Equal | ComparisonOp::NotEqual => false,
                },
                None => false,
            },
        }
    }
}

/// Conjunction over all conditions; an empty list matches every row.
pub fn row_matches(row: &Row, columns: &[ColumnSchema], conditions: &[Condition]) -> bool {
    conditions
        .iter()
        .all(|condition| condition.evaluate(row, columns))
}
