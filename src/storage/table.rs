use std::collections::HashMap;

use tracing::warn;

use crate::{
    executor::predicate::{row_matches, Condition},
    storage::{bplus_tree::BPlusTree, schema::ColumnSchema},
    types::{
        error::DatabaseError,
        row::Row,
        value::{DataType, Value},
        RowSlot,
    },
};

/// A table couples a row heap with an optional primary-key index.
///
/// The index maps a primary-key value to the row's position in the heap.
/// Positions go stale when a delete compacts the heap; readers filter them
/// with a bounds check instead of the index being rewritten.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<ColumnSchema>,
    rows: Vec<Row>,
    primary_key: Option<usize>,
    pk_index: Option<BPlusTree<Value, RowSlot>>,
}

impl Table {
    /// Build a table from validated column definitions. At most one column
    /// may be the primary key, and its type must be indexable (Int or
    /// Text).
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Result<Self, DatabaseError> {
        let name = name.into();
        let mut primary_key = None;
        for (position, column) in columns.iter().enumerate() {
            if !column.primary_key {
                continue;
            }
            if primary_key.is_some() {
                return Err(DatabaseError::MultiplePrimaryKeys { table: name });
            }
            if !matches!(column.data_type, DataType::Int | DataType::Text) {
                return Err(DatabaseError::InvalidPrimaryKeyType {
                    column: column.name.clone(),
                    data_type: column.data_type,
                });
            }
            primary_key = Some(position);
        }
        let pk_index = primary_key.map(|_| BPlusTree::new());
        Ok(Self {
            name,
            columns,
            rows: Vec::new(),
            primary_key,
            pk_index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Insert a row, enforcing arity, NOT NULL, column types, and
    /// primary-key uniqueness. Nothing changes when any check fails.
    pub fn insert(&mut self, row: Row) -> Result<(), DatabaseError> {
        if row.len() != self.columns.len() {
            return Err(DatabaseError::ColumnCountMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        for (column, value) in self.columns.iter().zip(&row.values) {
            if column.not_null && value.is_null() {
                return Err(DatabaseError::NullConstraintViolation {
                    column: column.name.clone(),
                });
            }
            if !value.is_null() && value.data_type() != column.data_type {
                return Err(DatabaseError::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.data_type,
                    actual: value.data_type(),
                });
            }
        }
        if let (Some(pk), Some(index)) = (self.primary_key, &self.pk_index) {
            if index.find(&row.values[pk]).is_some() {
                return Err(DatabaseError::DuplicateKey {
                    key: row.values[pk].to_string(),
                });
            }
        }

        let slot = self.rows.len();
        let key = self.primary_key.map(|pk| row.values[pk].clone());
        self.rows.push(row);
        if let (Some(key), Some(index)) = (key, &mut self.pk_index) {
            index.insert(key, slot);
        }
        Ok(())
    }

    /// Select rows matching the conditions, in insertion order.
    ///
    /// A single equality condition on the primary key whose value matches
    /// the key's type goes through the index; everything else scans.
    pub fn select(&self, conditions: &[Condition]) -> Vec<Row> {
        if let (Some(pk), Some(index)) = (self.primary_key, &self.pk_index) {
            if let [condition] = conditions {
                let pk_column = &self.columns[pk];
                if condition.column_name == pk_column.name
                    && condition.op == "="
                    && condition.value.data_type() == pk_column.data_type
                {
                    let mut result = Vec::new();
                    if let Some(&slot) = index.find(&condition.value) {
                        // Stale positions left behind by deletes fall out here.
                        if slot < self.rows.len() {
                            result.push(self.rows[slot].clone());
                        }
                    }
                    return result;
                }
            }
        }
        self.rows
            .iter()
            .filter(|row| row_matches(row, &self.columns, conditions))
            .cloned()
            .collect()
    }

    /// Update rows matching the conditions; returns how many were touched.
    ///
    /// Unknown assignment names are ignored. A row whose new primary key
    /// already belongs to a different row is skipped entirely. Individual
    /// assignments with a mismatched value type are skipped without
    /// aborting the row. A changed primary key is re-indexed at the same
    /// slot; the old key's entry stays behind until something overwrites it.
    pub fn update(
        &mut self,
        assignments: &HashMap<String, Value>,
        conditions: &[Condition],
    ) -> usize {
        let mut resolved: HashMap<usize, Value> = HashMap::new();
        for (column_name, value) in assignments {
            if let Some(position) = self.column_index(column_name) {
                resolved.insert(position, value.clone());
            }
        }

        let mut count = 0;
        for slot in 0..self.rows.len() {
            if !row_matches(&self.rows[slot], &self.columns, conditions) {
                continue;
            }

            let pk_assignment = self
                .primary_key
                .and_then(|pk| resolved.get(&pk).map(|value| (pk, value.clone())));
            if let (Some((_, new_key)), Some(index)) = (&pk_assignment, &self.pk_index) {
                if let Some(&existing) = index.find(new_key) {
                    if existing != slot {
                        continue; // duplicate key, leave the row untouched
                    }
                }
            }

            for (&position, value) in &resolved {
                if !value.is_null() && value.data_type() != self.columns[position].data_type {
                    warn!(
                        table = %self.name,
                        column = %self.columns[position].name,
                        "skipping assignment with mismatched value type"
                    );
                    continue;
                }
                self.rows[slot].values[position] = value.clone();
            }

            if let (Some((pk, _)), Some(index)) = (&pk_assignment, &mut self.pk_index) {
                index.insert(self.rows[slot].values[*pk].clone(), slot);
            }
            count += 1;
        }
        count
    }

    /// Delete rows matching the conditions; returns how many were removed.
    /// The primary-key index keeps its entries; the bounds check on reads
    /// filters the positions that no longer resolve.
    pub fn remove(&mut self, conditions: &[Condition]) -> usize {
        let before = self.rows.len();
        let columns = &self.columns;
        self.rows
            .retain(|row| !row_matches(row, columns, conditions));
        before - self.rows.len()
    }

    /// Replace the row heap wholesale, as transaction rollback does. The
    /// primary-key index is left as-is.
    pub fn restore_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }
}
