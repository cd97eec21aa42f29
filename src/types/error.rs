use thiserror::Error;

use crate::types::{value::DataType, TransactionId};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Table '{name}' not found")]
    TableNotFound { name: String },

    #[error("Table '{name}' already exists")]
    TableAlreadyExists { name: String },

    #[error("Column '{name}' not found in table '{table}'")]
    ColumnNotFound { name: String, table: String },

    #[error("Transaction {id} not found")]
    TransactionNotFound { id: TransactionId },

    #[error("Duplicate primary key: {key}")]
    DuplicateKey { key: String },

    #[error("Row has {actual} values but table '{table}' expects {expected}")]
    ColumnCountMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("NULL value in NOT NULL column '{column}'")]
    NullConstraintViolation { column: String },

    #[error("Type mismatch in column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("Multiple primary keys declared on table '{table}'")]
    MultiplePrimaryKeys { table: String },

    #[error("Column '{column}' cannot be a primary key: {data_type} keys are not indexable")]
    InvalidPrimaryKeyType { column: String, data_type: DataType },
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
