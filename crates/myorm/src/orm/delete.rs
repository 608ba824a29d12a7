//! DELETE rendering and execution.

use crate::driver::Connection;
use crate::error::OrmResult;
use crate::example::Example;
use crate::exec;
use crate::orm::Orm;
use crate::statement::Statement;
use crate::value::Value;

impl<C: Connection> Orm<C> {
    /// Render a DELETE scoped to one primary key without executing it.
    pub fn delete_by_primary_key_stmt(&self, key: Value) -> Statement {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            self.quoted_table(),
            self.quoted_key()
        );
        Statement::new(sql, vec![key])
    }

    /// Delete the row identified by the primary key. Returns affected rows.
    pub fn delete_by_primary_key(&self, key: Value) -> OrmResult<u64> {
        let stmt = self.delete_by_primary_key_stmt(key);
        exec::execute(self.conn(), &stmt)
    }

    /// Render a DELETE scoped by a condition without executing it.
    ///
    /// The condition must have at least one term; an unscoped DELETE is
    /// refused with [`OrmError::EmptyCondition`](crate::OrmError::EmptyCondition).
    pub fn delete_by_example_stmt(&self, example: &Example) -> OrmResult<Statement> {
        let (where_sql, params) = example.build()?;
        let sql = format!("DELETE FROM {} WHERE {}", self.quoted_table(), where_sql);
        Ok(Statement::new(sql, params))
    }

    /// Delete every row matching the condition. Returns affected rows.
    pub fn delete_by_example(&self, example: &Example) -> OrmResult<u64> {
        let stmt = self.delete_by_example_stmt(example)?;
        exec::execute(self.conn(), &stmt)
    }
}
