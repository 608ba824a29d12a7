//! Error types for myorm

use crate::driver::DriverError;
use thiserror::Error;

/// Result type alias for myorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for builder and execution operations.
///
/// Two tiers: *usage* errors are raised before any SQL reaches the driver
/// (bad arguments to a builder call), while *execution* errors come back from
/// the driver after the statement was attempted and the transaction rolled
/// back. Callers that only care about the tier can use [`OrmError::is_usage`]
/// and [`OrmError::is_execution`].
#[derive(Debug, Error)]
pub enum OrmError {
    /// Insert/update called with an empty data payload
    #[error("empty data payload")]
    EmptyData,

    /// Update by primary key with no key value available
    #[error("no primary key value supplied")]
    MissingKey,

    /// A scoped mutation was given a condition with zero terms
    #[error("condition has no terms; refusing an unscoped statement")]
    EmptyCondition,

    /// A batch-insert row lacks a column the first row declared
    #[error("row {index} is missing column `{column}`")]
    MissingColumn { index: usize, column: String },

    /// A batch-insert row carries more values than the column list
    #[error("row {index} has {got} values for {expected} columns")]
    RowWidthMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// Statement failed at the driver; the transaction was rolled back
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// Statement failed and the subsequent rollback failed too
    #[error("{source} (rollback failed: {rollback})")]
    RollbackFailed {
        source: DriverError,
        rollback: DriverError,
    },

    /// A deferred batch failed; `index` is the 0-based failing statement.
    /// `source` keeps the full failure, including a failed rollback.
    #[error("batch statement {index} failed: {source}")]
    Batch { index: usize, source: Box<OrmError> },
}

impl OrmError {
    /// True for errors raised before any SQL was issued.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::EmptyData
                | Self::MissingKey
                | Self::EmptyCondition
                | Self::MissingColumn { .. }
                | Self::RowWidthMismatch { .. }
        )
    }

    /// True for errors reported by the driver during execution.
    pub fn is_execution(&self) -> bool {
        !self.is_usage()
    }

    /// Check if this is a batch error, returning the failing index.
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            Self::Batch { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_and_execution_tiers_are_disjoint() {
        let usage = OrmError::MissingKey;
        let exec = OrmError::Driver(DriverError::new("connection lost"));
        assert!(usage.is_usage() && !usage.is_execution());
        assert!(exec.is_execution() && !exec.is_usage());
    }

    #[test]
    fn batch_index_is_reported() {
        let err = OrmError::Batch {
            index: 1,
            source: Box::new(OrmError::Driver(DriverError::new("duplicate key"))),
        };
        assert_eq!(err.batch_index(), Some(1));
        assert!(err.is_execution());
    }
}
