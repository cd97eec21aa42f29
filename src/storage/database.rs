use std::collections::HashMap;

use tracing::debug;

use crate::{
    storage::{schema::ColumnSchema, table::Table},
    types::error::DatabaseError,
};

/// Named catalog of tables. Owns every table exclusively.
#[derive(Debug, Default)]
pub struct Database {
    name: String,
    tables: HashMap<String, Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a new table. Duplicate names, multiple primary keys, and
    /// non-indexable primary-key types are rejected.
    pub fn create_table(
        &mut self,
        name: &str,
        columns: Vec<ColumnSchema>,
    ) -> Result<(), DatabaseError> {
        if self.table_exists(name) {
            return Err(DatabaseError::TableAlreadyExists {
                name: name.to_string(),
            });
        }
        let table = Table::new(name, columns)?;
        self.tables.insert(name.to_string(), table);
        debug!(table = name, "table created");
        Ok(())
    }

    pub fn drop_table(&mut self, name: &str) -> Result<(), DatabaseError> {
        if self.tables.remove(name).is_none() {
            return Err(DatabaseError::TableNotFound {
                name: name.to_string(),
            });
        }
        debug!(table = name, "table dropped");
        Ok(())
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// All table names, sorted for stable output.
    pub fn list_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}
