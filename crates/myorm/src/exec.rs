//! Execution engine: runs rendered statements on a connection.
//!
//! Every call opens one cursor scoped to the call (released on every exit
//! path). Mutations commit on success; on a driver error they roll back the
//! connection's transaction before surfacing the error, so a failed
//! statement never leaves uncommitted work behind. Reads neither commit nor
//! roll back.

use crate::driver::{Connection, DriverError};
use crate::error::{OrmError, OrmResult};
use crate::row::Row;
use crate::statement::Statement;
use crate::value::Value;

/// Execute a mutation statement and commit. Returns affected rows.
pub(crate) fn execute(conn: &impl Connection, stmt: &Statement) -> OrmResult<u64> {
    let mut cursor = conn.cursor()?;
    tracing::debug!(sql = stmt.sql(), params = stmt.params().len(), "execute");
    match cursor.execute(stmt.sql(), stmt.params()) {
        Ok(affected) => {
            drop(cursor);
            conn.commit()?;
            Ok(affected)
        }
        Err(err) => {
            drop(cursor);
            Err(rollback_after(conn, err))
        }
    }
}

/// Execute an insert statement, commit, and report the driver's
/// last-insert-id if it has one.
pub(crate) fn execute_insert(conn: &impl Connection, stmt: &Statement) -> OrmResult<Option<u64>> {
    let mut cursor = conn.cursor()?;
    tracing::debug!(sql = stmt.sql(), params = stmt.params().len(), "insert");
    match cursor.execute(stmt.sql(), stmt.params()) {
        Ok(_) => {
            let last_id = cursor.last_insert_id();
            drop(cursor);
            conn.commit()?;
            Ok(last_id)
        }
        Err(err) => {
            drop(cursor);
            Err(rollback_after(conn, err))
        }
    }
}

/// Execute an insert once per parameter row, commit, and report the driver's
/// last-insert-id if it has one.
pub(crate) fn execute_insert_many(
    conn: &impl Connection,
    sql: &str,
    rows: &[Vec<Value>],
) -> OrmResult<Option<u64>> {
    let mut cursor = conn.cursor()?;
    tracing::debug!(sql, rows = rows.len(), "insert many");
    match cursor.execute_many(sql, rows) {
        Ok(_) => {
            let last_id = cursor.last_insert_id();
            drop(cursor);
            conn.commit()?;
            Ok(last_id)
        }
        Err(err) => {
            drop(cursor);
            Err(rollback_after(conn, err))
        }
    }
}

/// Run a query and fetch all rows in driver order.
pub(crate) fn query_all(conn: &impl Connection, stmt: &Statement) -> OrmResult<Vec<Row>> {
    let mut cursor = conn.cursor()?;
    tracing::debug!(sql = stmt.sql(), params = stmt.params().len(), "query");
    cursor.execute(stmt.sql(), stmt.params())?;
    Ok(cursor.fetch_all()?)
}

/// Run a query and fetch the first row, if any.
pub(crate) fn query_one(conn: &impl Connection, stmt: &Statement) -> OrmResult<Option<Row>> {
    let mut cursor = conn.cursor()?;
    tracing::debug!(sql = stmt.sql(), params = stmt.params().len(), "query one");
    cursor.execute(stmt.sql(), stmt.params())?;
    Ok(cursor.fetch_one()?)
}

/// Roll back after a failed mutation, folding a rollback failure into the
/// reported error.
pub(crate) fn rollback_after(conn: &impl Connection, source: DriverError) -> OrmError {
    tracing::error!(error = %source, "statement failed, rolling back");
    match conn.rollback() {
        Ok(()) => OrmError::Driver(source),
        Err(rollback) => {
            tracing::error!(error = %rollback, "rollback failed");
            OrmError::RollbackFailed { source, rollback }
        }
    }
}
