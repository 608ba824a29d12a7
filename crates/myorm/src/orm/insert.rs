//! INSERT rendering and execution.

use crate::driver::Connection;
use crate::error::{OrmError, OrmResult};
use crate::exec;
use crate::ident::quote_part;
use crate::orm::{KeyStrategy, Orm};
use crate::row::Row;
use crate::statement::Statement;
use crate::value::Value;

impl<C: Connection> Orm<C> {
    /// Render a single-row INSERT without executing it.
    ///
    /// If the key strategy is [`KeyStrategy::Generated`] and `data` carries
    /// no usable key (absent, `Null`, or zero), the generator's value is
    /// baked into the statement.
    pub fn insert_stmt(&self, data: Row) -> OrmResult<Statement> {
        self.prepare_insert(data).map(|(stmt, _)| stmt)
    }

    /// Insert one row and return its primary key: the generated (or
    /// caller-supplied) key under [`KeyStrategy::Generated`], otherwise the
    /// driver-reported last-insert-id (`Null` when the driver has none).
    pub fn insert_one(&self, data: Row) -> OrmResult<Value> {
        let (stmt, generated_key) = self.prepare_insert(data)?;
        let last_id = exec::execute_insert(self.conn(), &stmt)?;
        Ok(match generated_key {
            Some(key) => key,
            None => last_id.map(Value::UInt).unwrap_or(Value::Null),
        })
    }

    /// Insert several rows sharing one column list, one parameter row each.
    /// Every row must match the column list's width exactly.
    ///
    /// Under [`KeyStrategy::Generated`], a missing key column is appended
    /// and every row gets a generated value. Returns the driver-reported
    /// last insert id (`Null` when the driver has none).
    pub fn insert_list(&self, columns: &[&str], rows: Vec<Vec<Value>>) -> OrmResult<Value> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(OrmError::EmptyData);
        }

        let mut columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let mut rows = rows;
        if let KeyStrategy::Generated(generator) = &self.key_strategy {
            if !columns.iter().any(|c| c == self.key_column()) {
                columns.push(self.key_column().to_string());
                for row in &mut rows {
                    row.push(generator());
                }
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() < columns.len() {
                return Err(OrmError::MissingColumn {
                    index,
                    column: columns[row.len()].clone(),
                });
            }
            if row.len() > columns.len() {
                return Err(OrmError::RowWidthMismatch {
                    index,
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }

        let sql = self.insert_sql(columns.iter().map(String::as_str));
        let last_id = exec::execute_insert_many(self.conn(), &sql, &rows)?;
        Ok(last_id.map(Value::UInt).unwrap_or(Value::Null))
    }

    /// Insert several row mappings. The column set is taken from the first
    /// row; a later row missing one of those columns is a usage error.
    /// Returns the driver-reported last insert id (`Null` when absent).
    pub fn insert_dict_list(&self, rows: Vec<Row>) -> OrmResult<Value> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(OrmError::EmptyData);
        }

        let mut rows = rows;
        if let KeyStrategy::Generated(generator) = &self.key_strategy {
            for row in &mut rows {
                let unset = row
                    .get(self.key_column())
                    .map_or(true, Value::is_unset);
                if unset {
                    row.insert(self.key_column(), generator());
                }
            }
        }

        let columns: Vec<String> = rows[0].columns().map(str::to_string).collect();
        let mut param_rows = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let mut params = Vec::with_capacity(columns.len());
            for column in &columns {
                match row.get(column) {
                    Some(value) => params.push(value.clone()),
                    None => {
                        return Err(OrmError::MissingColumn {
                            index,
                            column: column.clone(),
                        });
                    }
                }
            }
            param_rows.push(params);
        }

        let sql = self.insert_sql(columns.iter().map(String::as_str));
        let last_id = exec::execute_insert_many(self.conn(), &sql, &param_rows)?;
        Ok(last_id.map(Value::UInt).unwrap_or(Value::Null))
    }

    fn prepare_insert(&self, mut data: Row) -> OrmResult<(Statement, Option<Value>)> {
        if data.is_empty() {
            return Err(OrmError::EmptyData);
        }

        let mut key = None;
        if let KeyStrategy::Generated(generator) = &self.key_strategy {
            let unset = data
                .get(self.key_column())
                .map_or(true, Value::is_unset);
            if unset {
                data.insert(self.key_column(), generator());
            }
            key = data.get(self.key_column()).cloned();
        }

        let sql = self.insert_sql(data.columns());
        let params: Vec<Value> = data.values().cloned().collect();
        Ok((Statement::new(sql, params), key))
    }

    fn insert_sql<'a>(&self, columns: impl Iterator<Item = &'a str>) -> String {
        let cols: Vec<String> = columns.map(quote_part).collect();
        let placeholders = vec!["?"; cols.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quoted_table(),
            cols.join(", "),
            placeholders
        )
    }
}
