//! Deferred transaction batches.
//!
//! A [`Transaction`] collects rendered statements — possibly from several
//! builders — and executes them in insertion order against one connection
//! with a single commit point. The first failing statement aborts the batch:
//! everything is rolled back and the error names the failing statement by
//! its 0-based index. No partial application is ever visible outside the
//! batch.
//!
//! While a batch is pending, the coordinator has exclusive use of its
//! connection: nothing else may execute, commit, or roll back on it.
//!
//! ```ignore
//! use myorm::Transaction;
//!
//! let result = Transaction::new(&conn)
//!     .add(user_orm.insert_stmt(user_row)?)
//!     .add(log_orm.insert_stmt(log_row)?)
//!     .commit()?;
//! assert_eq!(result.statements, 2);
//! ```

use crate::driver::Connection;
use crate::error::{OrmError, OrmResult};
use crate::exec;
use crate::statement::Statement;

/// Outcome of a successfully committed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitResult {
    /// Number of statements executed.
    pub statements: usize,
    /// Total affected rows across the batch.
    pub rows_affected: u64,
}

/// An ordered batch of pending statements bound to one connection.
#[derive(Debug)]
pub struct Transaction<'a, C: Connection> {
    conn: &'a C,
    pending: Vec<Statement>,
}

impl<'a, C: Connection> Transaction<'a, C> {
    /// Start an empty batch on `conn`.
    pub fn new(conn: &'a C) -> Self {
        Self {
            conn,
            pending: Vec::new(),
        }
    }

    /// Append a rendered statement to the batch.
    pub fn add(mut self, stmt: Statement) -> Self {
        self.pending.push(stmt);
        self
    }

    /// Append several rendered statements, preserving order.
    pub fn add_all(mut self, stmts: impl IntoIterator<Item = Statement>) -> Self {
        self.pending.extend(stmts);
        self
    }

    /// Number of pending statements.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Execute every pending statement in insertion order, then commit once.
    ///
    /// On the first driver error the whole batch is rolled back and
    /// [`OrmError::Batch`] identifies the failing statement. An empty batch
    /// commits trivially without touching the driver.
    pub fn commit(self) -> OrmResult<CommitResult> {
        if self.pending.is_empty() {
            return Ok(CommitResult {
                statements: 0,
                rows_affected: 0,
            });
        }

        let mut rows_affected = 0u64;
        {
            let mut cursor = self.conn.cursor()?;
            for (index, stmt) in self.pending.iter().enumerate() {
                tracing::debug!(index, sql = stmt.sql(), "batch execute");
                match cursor.execute(stmt.sql(), stmt.params()) {
                    Ok(affected) => rows_affected += affected,
                    Err(source) => {
                        drop(cursor);
                        return Err(OrmError::Batch {
                            index,
                            source: Box::new(exec::rollback_after(self.conn, source)),
                        });
                    }
                }
            }
        }

        self.conn.commit()?;
        Ok(CommitResult {
            statements: self.pending.len(),
            rows_affected,
        })
    }
}
