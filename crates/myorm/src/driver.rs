//! Driver seam: the connection/cursor contract the builders execute against.
//!
//! myorm does not ship a database driver. Anything that can hand out cursors,
//! run parameterized SQL, and commit or roll back a connection-level
//! transaction can back the builders by implementing [`Connection`] and
//! [`Cursor`]. The expected dialect is MySQL-flavored: backtick-quoted
//! identifiers, `?` positional placeholders, `LIMIT offset, count`.
//!
//! A cursor is scoped to a single operation. Implementations release whatever
//! server-side resource backs the cursor in `Drop`, so every exit path of an
//! operation — success or error — frees it.

use crate::row::Row;
use crate::value::Value;
use thiserror::Error;

/// Result type alias for driver calls
pub type DriverResult<T> = Result<T, DriverError>;

/// An error reported by the underlying driver.
///
/// Drivers map their native error type into this; the message is carried
/// through to diagnostics and [`OrmError::Driver`](crate::OrmError::Driver).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DriverError {
    message: String,
}

impl DriverError {
    /// Create a driver error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The driver-supplied message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for DriverError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for DriverError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// A statement cursor scoped to one operation.
pub trait Cursor {
    /// Execute `sql` with one positional parameter per `?` placeholder.
    /// Returns the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[Value]) -> DriverResult<u64>;

    /// Execute `sql` once per parameter row (batch insert).
    fn execute_many(&mut self, sql: &str, rows: &[Vec<Value>]) -> DriverResult<u64>;

    /// Fetch the next result row, if any.
    fn fetch_one(&mut self) -> DriverResult<Option<Row>>;

    /// Fetch all remaining result rows in driver order.
    fn fetch_all(&mut self) -> DriverResult<Vec<Row>>;

    /// The auto-increment id produced by the last insert on this cursor,
    /// if the driver has one to report.
    fn last_insert_id(&self) -> Option<u64>;
}

/// A database connection owning one implicit transaction at a time.
///
/// Methods take `&self` so several builders (and one pending
/// [`Transaction`](crate::Transaction)) can share a connection by reference;
/// interior mutability is the implementation's concern. The model is strictly
/// single-threaded: callers must not interleave commits from multiple threads.
pub trait Connection {
    /// Open a cursor for one statement sequence.
    fn cursor(&self) -> DriverResult<Box<dyn Cursor + '_>>;

    /// Commit the current transaction.
    fn commit(&self) -> DriverResult<()>;

    /// Roll back the current transaction.
    fn rollback(&self) -> DriverResult<()>;

    /// Release the underlying connection.
    fn close(&self) -> DriverResult<()>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn cursor(&self) -> DriverResult<Box<dyn Cursor + '_>> {
        (**self).cursor()
    }

    fn commit(&self) -> DriverResult<()> {
        (**self).commit()
    }

    fn rollback(&self) -> DriverResult<()> {
        (**self).rollback()
    }

    fn close(&self) -> DriverResult<()> {
        (**self).close()
    }
}
