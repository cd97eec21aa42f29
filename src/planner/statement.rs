//! Parsed statement structures, the engine's input.
//!
//! Tokenizing and parsing SQL text happens upstream; the executor receives
//! these already-validated shapes. Value strings arrive raw - quoted
//! literals still carry their quotes - and are coerced against column
//! types at execution.

use serde::{Deserialize, Serialize};

use crate::types::TransactionId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    CreateTable(CreateTableStmt),
    Insert(InsertStmt),
    Select(SelectStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
    DropTable(DropTableStmt),
    ShowTables,
    BeginTransaction,
    CommitTransaction(CommitTransactionStmt),
    AbortTransaction(AbortTransactionStmt),
}

/// Column definition as it arrives from the parser; the type name is
/// resolved against the engine's data types at execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub type_name: String,
    pub primary_key: bool,
    pub not_null: bool,
}

/// WHERE condition with the comparison value still in raw string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCondition {
    pub column: String,
    pub op: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStmt {
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStmt {
    pub table_name: String,
    /// Target columns; empty means values are positional for every column.
    pub columns: Vec<String>,
    /// One inner vector of value strings per row to insert.
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStmt {
    /// Columns to project; empty means all.
    pub columns: Vec<String>,
    pub table_name: String,
    pub conditions: Vec<ParsedCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStmt {
    pub table_name: String,
    pub assignments: Vec<Assignment>,
    pub conditions: Vec<ParsedCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStmt {
    pub table_name: String,
    pub conditions: Vec<ParsedCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTableStmt {
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitTransactionStmt {
    pub transaction_id: TransactionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbortTransactionStmt {
    pub transaction_id: TransactionId,
}
