use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::{
    storage::database::Database,
    types::{error::DatabaseError, row::Row, TransactionId, NO_TRANSACTION},
};

/// Transaction State
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Active,
    Committed,
    Aborted,
}

/// A live transaction and the pre-images backing its rollback.
///
/// Each table is captured at most once: the snapshot taken before the
/// transaction's first mutation of that table is the state rollback
/// restores.
#[derive(Debug)]
pub struct Transaction {
    id: TransactionId,
    state: TransactionState,
    pre_images: HashMap<String, Vec<Row>>,
}

impl Transaction {
    fn new(id: TransactionId) -> Self {
        Self {
            id,
            state: TransactionState::Active,
            pre_images: HashMap::new(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }
}

#[derive(Debug)]
struct ManagerState {
    next_id: TransactionId,
    transactions: HashMap<TransactionId, Transaction>,
}

/// Issues transaction ids and holds per-transaction snapshots until the
/// transaction terminates. A single mutex serializes every state change.
///
/// The manager is an owned handle, not a process-wide singleton; tests
/// build a fresh one per case.
#[derive(Debug)]
pub struct TransactionManager {
    state: Mutex<ManagerState>,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ManagerState {
                next_id: 1,
                transactions: HashMap::new(),
            }),
        }
    }

    /// Begin a new transaction and return its id.
    pub fn begin(&self) -> TransactionId {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.transactions.insert(id, Transaction::new(id));
        debug!(transaction = id, "transaction started");
        id
    }

    /// Commit a transaction, discarding its snapshots.
    pub fn commit(&self, id: TransactionId) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();
        match state.transactions.remove(&id) {
            Some(mut transaction) => {
                transaction.state = TransactionState::Committed;
                debug!(transaction = id, "transaction committed");
                Ok(())
            }
            None => Err(DatabaseError::TransactionNotFound { id }),
        }
    }

    /// Abort a transaction, restoring every captured snapshot into the
    /// catalog. Primary-key indexes are not rebuilt from the restored
    /// rows; stale positions are filtered by the bounds check on reads.
    pub fn abort(&self, id: TransactionId, database: &mut Database) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();
        let mut transaction = state
            .transactions
            .remove(&id)
            .ok_or(DatabaseError::TransactionNotFound { id })?;
        for (table_name, snapshot) in transaction.pre_images.drain() {
            match database.get_table_mut(&table_name) {
                Some(table) => table.restore_rows(snapshot),
                // A table dropped mid-transaction has no schema left to
                // restore into.
                None => debug!(
                    transaction = id,
                    table = %table_name,
                    "skipping snapshot for missing table"
                ),
            }
        }
        transaction.state = TransactionState::Aborted;
        debug!(transaction = id, "transaction aborted");
        Ok(())
    }

    /// Record the rows of `table_name` as the pre-image for `id`, once.
    /// The first capture wins; later mutations of the same table within
    /// the transaction keep the original snapshot. Id 0 and ids of
    /// unknown or terminated transactions are no-ops.
    pub fn capture(&self, id: TransactionId, table_name: &str, rows: &[Row]) {
        if id == NO_TRANSACTION {
            return;
        }
        let mut state = self.state.lock().unwrap();
        if let Some(transaction) = state.transactions.get_mut(&id) {
            if transaction.state == TransactionState::Active
                && !transaction.pre_images.contains_key(table_name)
            {
                transaction
                    .pre_images
                    .insert(table_name.to_string(), rows.to_vec());
            }
        }
    }

    /// Check if a transaction exists and is active.
    pub fn is_active(&self, id: TransactionId) -> bool {
        self.state
            .lock()
            .unwrap()
            .transactions
            .get(&id)
            .map_or(false, |transaction| {
                transaction.state == TransactionState::Active
            })
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}
