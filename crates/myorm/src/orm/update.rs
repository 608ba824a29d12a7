//! UPDATE rendering and execution.

use crate::driver::Connection;
use crate::error::{OrmError, OrmResult};
use crate::example::Example;
use crate::exec;
use crate::ident::quote_part;
use crate::orm::Orm;
use crate::row::Row;
use crate::statement::Statement;
use crate::value::Value;

impl<C: Connection> Orm<C> {
    /// Render an UPDATE scoped to one primary key without executing it.
    ///
    /// The key comes from `key` or, failing that, is pulled out of `data`;
    /// either way the key column is removed from the SET list so it is never
    /// reassigned. A key that is `Null` or zero counts as not supplied.
    pub fn update_by_primary_key_stmt(
        &self,
        mut data: Row,
        key: Option<Value>,
    ) -> OrmResult<Statement> {
        let popped = data.remove(self.key_column());
        let key = self.require_key(key.or(popped))?;
        if data.is_empty() {
            return Err(OrmError::EmptyData);
        }

        let (set_sql, mut params) = set_clause(&data);
        params.push(key);
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.quoted_table(),
            set_sql,
            self.quoted_key()
        );
        Ok(Statement::new(sql, params))
    }

    /// Update the row identified by the primary key. Returns affected rows.
    pub fn update_by_primary_key(&self, data: Row, key: Option<Value>) -> OrmResult<u64> {
        let stmt = self.update_by_primary_key_stmt(data, key)?;
        exec::execute(self.conn(), &stmt)
    }

    /// Render an UPDATE scoped by a condition without executing it.
    ///
    /// The condition must have at least one term; an unscoped UPDATE is
    /// refused with [`OrmError::EmptyCondition`].
    pub fn update_by_example_stmt(&self, data: &Row, example: &Example) -> OrmResult<Statement> {
        let (where_sql, where_params) = example.build()?;
        if data.is_empty() {
            return Err(OrmError::EmptyData);
        }

        let (set_sql, mut params) = set_clause(data);
        params.extend(where_params);
        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.quoted_table(),
            set_sql,
            where_sql
        );
        Ok(Statement::new(sql, params))
    }

    /// Update every row matching the condition. Returns affected rows.
    pub fn update_by_example(&self, data: &Row, example: &Example) -> OrmResult<u64> {
        let stmt = self.update_by_example_stmt(data, example)?;
        exec::execute(self.conn(), &stmt)
    }
}

fn set_clause(data: &Row) -> (String, Vec<Value>) {
    let sql = data
        .columns()
        .map(|c| format!("{} = ?", quote_part(c)))
        .collect::<Vec<_>>()
        .join(", ");
    (sql, data.values().cloned().collect())
}
