pub mod error;
pub mod row;
pub mod value;

// Common type aliases
pub type TransactionId = u64;
pub type RowSlot = usize;

/// Transaction id meaning "no transaction": mutations run against the base
/// state and no snapshot is captured.
pub const NO_TRANSACTION: TransactionId = 0;
