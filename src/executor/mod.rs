pub mod executor;
pub mod predicate;

pub use self::executor::{ExecutionResult, Executor};
