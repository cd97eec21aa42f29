use std::collections::HashMap;

use tracing::warn;

use crate::{
    executor::predicate::Condition,
    planner::statement::{
        ColumnDefinition, CreateTableStmt, DeleteStmt, DropTableStmt, InsertStmt, ParsedCondition,
        SelectStmt, Statement, UpdateStmt,
    },
    storage::{database::Database, schema::ColumnSchema, table::Table},
    transaction::TransactionManager,
    types::{
        error::DatabaseError,
        row::Row,
        value::{DataType, Value},
        TransactionId,
    },
};

/// Result envelope for an executed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// Rows and the column definitions they project.
    Rows {
        columns: Vec<ColumnSchema>,
        rows: Vec<Row>,
    },
    /// Number of rows an insert/update/delete touched.
    RowsAffected(usize),
    /// Table names in the catalog.
    TableList(Vec<String>),
    /// Id handed out by BEGIN TRANSACTION.
    TransactionStarted(TransactionId),
    /// DDL or transaction control succeeded.
    Done,
}

/// Dispatches parsed statements to the engine.
pub struct Executor {
    database: Database,
    transactions: TransactionManager,
}

impl Executor {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            transactions: TransactionManager::new(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn transactions(&self) -> &TransactionManager {
        &self.transactions
    }

    /// Execute one statement. A `tx_id` of [`crate::types::NO_TRANSACTION`]
    /// runs against the base state; any other id snapshots each table
    /// before its first mutation so the transaction can roll back.
    pub fn execute(
        &mut self,
        statement: Statement,
        tx_id: TransactionId,
    ) -> Result<ExecutionResult, DatabaseError> {
        match statement {
            Statement::CreateTable(stmt) => self.create_table(stmt),
            Statement::Insert(stmt) => self.insert(stmt, tx_id),
            Statement::Select(stmt) => self.select(stmt),
            Statement::Update(stmt) => self.update(stmt, tx_id),
            Statement::Delete(stmt) => self.delete(stmt, tx_id),
            Statement::DropTable(stmt) => self.drop_table(stmt),
            Statement::ShowTables => Ok(ExecutionResult::TableList(self.database.list_tables())),
            Statement::BeginTransaction => Ok(ExecutionResult::TransactionStarted(
                self.transactions.begin(),
            )),
            Statement::CommitTransaction(stmt) => {
                self.transactions.commit(stmt.transaction_id)?;
                Ok(ExecutionResult::Done)
            }
            Statement::AbortTransaction(stmt) => {
                self.transactions
                    .abort(stmt.transaction_id, &mut self.database)?;
                Ok(ExecutionResult::Done)
            }
        }
    }

    fn create_table(&mut self, stmt: CreateTableStmt) -> Result<ExecutionResult, DatabaseError> {
        let columns = stmt.columns.iter().map(convert_column_def).collect();
        self.database.create_table(&stmt.table_name, columns)?;
        Ok(ExecutionResult::Done)
    }

    fn drop_table(&mut self, stmt: DropTableStmt) -> Result<ExecutionResult, DatabaseError> {
        self.database.drop_table(&stmt.table_name)?;
        Ok(ExecutionResult::Done)
    }

    /// Insert each value row, counting successes. One bad row does not
    /// abort the batch.
    fn insert(
        &mut self,
        stmt: InsertStmt,
        tx_id: TransactionId,
    ) -> Result<ExecutionResult, DatabaseError> {
        let table = self
            .database
            .get_table_mut(&stmt.table_name)
            .ok_or_else(|| DatabaseError::TableNotFound {
                name: stmt.table_name.clone(),
            })?;
        self.transactions.capture(tx_id, &stmt.table_name, table.rows());

        let mut inserted = 0;
        for value_strs in &stmt.values {
            let row = match build_row(table, &stmt.columns, value_strs) {
                Ok(row) => row,
                Err(error) => {
                    warn!(table = %stmt.table_name, %error, "row discarded");
                    continue;
                }
            };
            match table.insert(row) {
                Ok(()) => inserted += 1,
                Err(error) => warn!(table = %stmt.table_name, %error, "row rejected"),
            }
        }
        Ok(ExecutionResult::RowsAffected(inserted))
    }

    fn select(&self, stmt: SelectStmt) -> Result<ExecutionResult, DatabaseError> {
        let table = self
            .database
            .get_table(&stmt.table_name)
            .ok_or_else(|| DatabaseError::TableNotFound {
                name: stmt.table_name.clone(),
            })?;
        let conditions = convert_conditions(&stmt.conditions, table.columns());
        let rows = table.select(&conditions);

        if stmt.columns.is_empty() {
            return Ok(ExecutionResult::Rows {
                columns: table.columns().to_vec(),
                rows,
            });
        }

        let mut projection = Vec::with_capacity(stmt.columns.len());
        for name in &stmt.columns {
            let position =
                table
                    .column_index(name)
                    .ok_or_else(|| DatabaseError::ColumnNotFound {
                        name: name.clone(),
                        table: stmt.table_name.clone(),
                    })?;
            projection.push(position);
        }
        let columns = projection
            .iter()
            .map(|&position| table.columns()[position].clone())
            .collect();
        let rows = rows
            .into_iter()
            .map(|row| {
                Row::new(
                    projection
                        .iter()
                        .map(|&position| row.values[position].clone())
                        .collect(),
                )
            })
            .collect();
        Ok(ExecutionResult::Rows { columns, rows })
    }

    fn update(
        &mut self,
        stmt: UpdateStmt,
        tx_id: TransactionId,
    ) -> Result<ExecutionResult, DatabaseError> {
        let table = self
            .database
            .get_table_mut(&stmt.table_name)
            .ok_or_else(|| DatabaseError::TableNotFound {
                name: stmt.table_name.clone(),
            })?;
        self.transactions.capture(tx_id, &stmt.table_name, table.rows());

        let conditions = convert_conditions(&stmt.conditions, table.columns());
        let mut assignments = HashMap::new();
        for assignment in &stmt.assignments {
            let data_type = column_type_or_text(table.columns(), &assignment.column);
            assignments.insert(
                assignment.column.clone(),
                Value::from_string(&assignment.value, &data_type),
            );
        }
        let count = table.update(&assignments, &conditions);
        Ok(ExecutionResult::RowsAffected(count))
    }

    fn delete(
        &mut self,
        stmt: DeleteStmt,
        tx_id: TransactionId,
    ) -> Result<ExecutionResult, DatabaseError> {
        let table = self
            .database
            .get_table_mut(&stmt.table_name)
            .ok_or_else(|| DatabaseError::TableNotFound {
                name: stmt.table_name.clone(),
            })?;
        self.transactions.capture(tx_id, &stmt.table_name, table.rows());

        let conditions = convert_conditions(&stmt.conditions, table.columns());
        Ok(ExecutionResult::RowsAffected(table.remove(&conditions)))
    }
}

fn convert_column_def(definition: &ColumnDefinition) -> ColumnSchema {
    let mut column = ColumnSchema::new(
        definition.name.clone(),
        DataType::from_type_name(&definition.type_name),
    );
    if definition.not_null {
        column = column.not_null();
    }
    if definition.primary_key {
        column = column.primary_key();
    }
    column
}

/// Coerce parsed conditions against their columns' types. Conditions on
/// unknown columns coerce as text; they evaluate false downstream anyway.
fn convert_conditions(conditions: &[ParsedCondition], columns: &[ColumnSchema]) -> Vec<Condition> {
    conditions
        .iter()
        .map(|condition| {
            let data_type = column_type_or_text(columns, &condition.column);
            Condition {
                column_name: condition.column.clone(),
                op: condition.op.clone(),
                value: Value::from_string(&condition.value, &data_type),
            }
        })
        .collect()
}

fn column_type_or_text(columns: &[ColumnSchema], name: &str) -> DataType {
    columns
        .iter()
        .find(|column| column.name == name)
        .map(|column| column.data_type)
        .unwrap_or(DataType::Text)
}

/// Build a row from its value strings. With explicit column names,
/// unnamed columns default to Null; positionally, every column needs a
/// value.
fn build_row(
    table: &Table,
    column_names: &[String],
    value_strs: &[String],
) -> Result<Row, DatabaseError> {
    let columns = table.columns();
    if column_names.is_empty() {
        if value_strs.len() != columns.len() {
            return Err(DatabaseError::ColumnCountMismatch {
                table: table.name().to_string(),
                expected: columns.len(),
                actual: value_strs.len(),
            });
        }
        let values = columns
            .iter()
            .zip(value_strs)
            .map(|(column, raw)| Value::from_string(raw, &column.data_type))
            .collect();
        return Ok(Row::new(values));
    }

    if value_strs.len() != column_names.len() {
        return Err(DatabaseError::ColumnCountMismatch {
            table: table.name().to_string(),
            expected: column_names.len(),
            actual: value_strs.len(),
        });
    }
    let mut values = vec![Value::Null; columns.len()];
    for (name, raw) in column_names.iter().zip(value_strs) {
        let position = table
            .column_index(name)
            .ok_or_else(|| DatabaseError::ColumnNotFound {
                name: name.clone(),
                table: table.name().to_string(),
            })?;
        values[position] = Value::from_string(raw, &columns[position].data_type);
    }
    Ok(Row::new(values))
}
