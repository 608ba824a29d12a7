//! SELECT rendering and execution: plain, keyed, filtered, aggregate, and
//! paginated reads.

use crate::driver::Connection;
use crate::error::OrmResult;
use crate::example::Example;
use crate::exec;
use crate::ident::{projection_item, quote_part};
use crate::orm::Orm;
use crate::row::Row;
use crate::statement::Statement;
use crate::value::Value;

/// Aggregate function for [`Orm::select_aggregate_by_example`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

impl Aggregate {
    fn as_sql(self) -> &'static str {
        match self {
            Aggregate::Count => "COUNT",
            Aggregate::Sum => "SUM",
            Aggregate::Avg => "AVG",
            Aggregate::Max => "MAX",
            Aggregate::Min => "MIN",
        }
    }
}

impl<C: Connection> Orm<C> {
    /// Render an unfiltered SELECT over the current clause state.
    pub fn select_stmt(&self) -> Statement {
        Statement::new(self.select_sql(None, None), Vec::new())
    }

    /// Render a SELECT scoped to one primary key.
    pub fn select_by_primary_key_stmt(&self, key: Value) -> Statement {
        let where_sql = format!("{} = ?", self.quoted_key());
        Statement::new(self.select_sql(Some(&where_sql), None), vec![key])
    }

    /// Render a SELECT filtered by `example`. An empty example renders no
    /// WHERE clause.
    pub fn select_by_example_stmt(&self, example: &Example) -> OrmResult<Statement> {
        if example.is_empty() {
            return Ok(self.select_stmt());
        }
        let (where_sql, params) = example.build()?;
        Ok(Statement::new(self.select_sql(Some(&where_sql), None), params))
    }

    /// Render a `SELECT COUNT(*)` over the same table, joins, and filter.
    pub fn count_stmt(&self, example: &Example) -> OrmResult<Statement> {
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.from_sql());
        let mut params = Vec::new();
        if !example.is_empty() {
            let (where_sql, where_params) = example.build()?;
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
            params = where_params;
        }
        Ok(Statement::new(sql, params))
    }

    /// Render a SELECT with one aggregate column appended to the current
    /// projection.
    pub fn aggregate_stmt(
        &self,
        func: Aggregate,
        expr: &str,
        alias: Option<&str>,
        example: &Example,
    ) -> OrmResult<Statement> {
        let computed = if expr == "*" {
            format!("{}(*)", func.as_sql())
        } else {
            format!("{}({})", func.as_sql(), projection_item(expr))
        };
        let mut projection = format!("{}, {}", self.projection_sql(), computed);
        if let Some(alias) = alias {
            projection.push_str(" AS ");
            projection.push_str(&quote_part(alias));
        }

        let mut sql = format!(
            "SELECT {}{} FROM {}",
            self.distinct_sql(),
            projection,
            self.from_sql()
        );
        let mut params = Vec::new();
        if !example.is_empty() {
            let (where_sql, where_params) = example.build()?;
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
            params = where_params;
        }
        sql.push_str(&self.tail_sql());
        Ok(Statement::new(sql, params))
    }

    // ==================== Execution ====================

    /// Fetch every row of the table under the current clause state.
    pub fn select_all(&self) -> OrmResult<Vec<Row>> {
        exec::query_all(self.conn(), &self.select_stmt())
    }

    /// Fetch the row with the given primary key, or `None`.
    pub fn select_by_primary_key(&self, key: Value) -> OrmResult<Option<Row>> {
        exec::query_one(self.conn(), &self.select_by_primary_key_stmt(key))
    }

    /// Fetch every row matching the condition, in driver order unless an
    /// ORDER BY clause is set.
    pub fn select_by_example(&self, example: &Example) -> OrmResult<Vec<Row>> {
        let stmt = self.select_by_example_stmt(example)?;
        exec::query_all(self.conn(), &stmt)
    }

    /// Fetch rows with an aggregate column appended to the projection.
    pub fn select_aggregate_by_example(
        &self,
        func: Aggregate,
        expr: &str,
        alias: Option<&str>,
        example: &Example,
    ) -> OrmResult<Vec<Row>> {
        let stmt = self.aggregate_stmt(func, expr, alias, example)?;
        exec::query_all(self.conn(), &stmt)
    }

    /// Count rows matching the condition over the same join/filter state.
    pub fn count_by_example(&self, example: &Example) -> OrmResult<u64> {
        let stmt = self.count_stmt(example)?;
        let row = exec::query_one(self.conn(), &stmt)?;
        Ok(row
            .as_ref()
            .and_then(|r| r.values().next())
            .and_then(Value::as_u64)
            .unwrap_or(0))
    }

    /// Paginated select: counts matching rows first, then fetches the page
    /// with `LIMIT offset, page_size`. Returns `(total, rows)`.
    ///
    /// `page` and `page_size` are 1-based and clamped to at least 1. When no
    /// rows match, or the page starts past the last row, the data query is
    /// skipped and the page comes back empty.
    pub fn select_page_by_example(
        &self,
        example: &Example,
        page: u64,
        page_size: u64,
    ) -> OrmResult<(u64, Vec<Row>)> {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let total = self.count_by_example(example)?;
        // An offset that overflows u64 starts past any result set.
        let offset = match (page - 1).checked_mul(page_size) {
            Some(offset) if total != 0 && offset < total => offset,
            _ => return Ok((total, Vec::new())),
        };

        let stmt = self.page_stmt(example, offset, page_size)?;
        let rows = exec::query_all(self.conn(), &stmt)?;
        Ok((total, rows))
    }

    fn page_stmt(&self, example: &Example, offset: u64, count: u64) -> OrmResult<Statement> {
        if example.is_empty() {
            return Ok(Statement::new(
                self.select_sql(None, Some((offset, count))),
                Vec::new(),
            ));
        }
        let (where_sql, params) = example.build()?;
        Ok(Statement::new(
            self.select_sql(Some(&where_sql), Some((offset, count))),
            params,
        ))
    }

    /// SELECT skeleton in the renderer's fixed clause order:
    /// `SELECT [DISTINCT] projection FROM table [joins] [WHERE] [ORDER BY]
    /// [GROUP BY] [LIMIT offset, count]`.
    fn select_sql(&self, where_sql: Option<&str>, limit: Option<(u64, u64)>) -> String {
        let mut sql = format!(
            "SELECT {}{} FROM {}",
            self.distinct_sql(),
            self.projection_sql(),
            self.from_sql()
        );
        if let Some(where_sql) = where_sql {
            sql.push_str(" WHERE ");
            sql.push_str(where_sql);
        }
        sql.push_str(&self.tail_sql());
        if let Some((offset, count)) = limit {
            sql.push_str(&format!(" LIMIT {offset}, {count}"));
        }
        sql
    }
}
