//! Raw-SQL passthrough for hand-written statements.
//!
//! The escape hatch for queries the clause language cannot express. The
//! execution contract is the same as the builders': `execute` commits on
//! success and rolls back on a driver error.

use crate::driver::Connection;
use crate::error::OrmResult;
use crate::exec;
use crate::row::Row;
use crate::statement::Statement;
use crate::value::Value;

/// A hand-written SQL statement with chainable parameter binding.
///
/// # Example
///
/// ```ignore
/// use myorm::query;
///
/// let rows = query("SELECT * FROM `user` WHERE `age` > ?")
///     .bind(18i64)
///     .fetch_all(&conn)?;
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    sql: String,
    params: Vec<Value>,
}

/// Create a new query with the given SQL.
pub fn query(sql: impl Into<String>) -> Query {
    Query {
        sql: sql.into(),
        params: Vec::new(),
    }
}

impl Query {
    /// Bind the next positional parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Bind several positional parameters at once.
    pub fn bind_all<T: Into<Value>>(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.params.extend(values.into_iter().map(Into::into));
        self
    }

    /// The rendered statement, for deferral into a transaction batch.
    pub fn into_statement(self) -> Statement {
        Statement::new(self.sql, self.params)
    }

    /// Run the query and return all rows.
    pub fn fetch_all(&self, conn: &impl Connection) -> OrmResult<Vec<Row>> {
        let stmt = Statement::new(self.sql.clone(), self.params.clone());
        exec::query_all(conn, &stmt)
    }

    /// Run the query and return the first row, if any.
    pub fn fetch_one(&self, conn: &impl Connection) -> OrmResult<Option<Row>> {
        let stmt = Statement::new(self.sql.clone(), self.params.clone());
        exec::query_one(conn, &stmt)
    }

    /// Execute as a mutation: commit on success, roll back on driver error.
    /// Returns the number of affected rows.
    pub fn execute(&self, conn: &impl Connection) -> OrmResult<u64> {
        let stmt = Statement::new(self.sql.clone(), self.params.clone());
        exec::execute(conn, &stmt)
    }
}
