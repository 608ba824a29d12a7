//! Table-scoped statement builder.
//!
//! An [`Orm`] is a stateful handle on one table: chainable configuration
//! calls accumulate clause state (projection, joins, ordering, grouping,
//! distinct, key strategy), and each operation method renders that state into
//! a [`Statement`](crate::Statement) and runs it. Renderer methods (the
//! `*_stmt` family) are pure, so statements can also be deferred into a
//! [`Transaction`](crate::Transaction) batch instead of executed directly.
//!
//! One builder is a single-owner, single-threaded value: clause state is
//! plain mutable state, and sharing an instance across threads needs external
//! synchronization. State persists across operation calls until [`Orm::clear`]
//! resets it.
//!
//! ```ignore
//! use myorm::{Orm, Order, row};
//!
//! let mut orm = Orm::new(&conn, "user");
//! let rows = orm
//!     .select_columns(&["name", "age"])
//!     .order_by("age", Order::Desc)
//!     .select_all()?;
//! ```

mod delete;
mod insert;
mod select;
mod update;

use crate::driver::Connection;
use crate::error::{OrmError, OrmResult};
use crate::ident::{projection_item, quote_part, quote_path};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

pub use select::Aggregate;

/// Sort direction for [`Orm::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// Join flavor for [`Orm::join`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    kind: JoinKind,
    table: String,
    on: String,
}

/// What the SELECT column list renders as.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Projection {
    /// `*`
    #[default]
    All,
    /// An ordered list of column names or expressions.
    Columns(Vec<String>),
    /// table-alias → columns, rendered as qualified `` `table`.`column` ``
    /// references in insertion order.
    Aliased(Vec<(String, Vec<String>)>),
}

impl Projection {
    fn to_sql(&self) -> String {
        match self {
            Projection::All => "*".to_string(),
            Projection::Columns(cols) => cols
                .iter()
                .map(|c| projection_item(c))
                .collect::<Vec<_>>()
                .join(", "),
            Projection::Aliased(tables) => {
                let mut parts = Vec::new();
                for (table, cols) in tables {
                    for col in cols {
                        parts.push(format!("{}.{}", quote_part(table), quote_part(col)));
                    }
                }
                parts.join(", ")
            }
        }
    }
}

/// How primary keys are produced on insert.
#[derive(Clone, Default)]
pub enum KeyStrategy {
    /// Defer to the database's auto-increment column.
    #[default]
    AutoIncrement,
    /// Call the generator for any insert payload whose key is absent or
    /// unset (`Null` or integer zero).
    Generated(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl KeyStrategy {
    /// Wrap a zero-argument generator function.
    pub fn generated(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        KeyStrategy::Generated(Arc::new(f))
    }
}

impl fmt::Debug for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::AutoIncrement => f.write_str("AutoIncrement"),
            KeyStrategy::Generated(_) => f.write_str("Generated(<fn>)"),
        }
    }
}

/// A fluent statement builder scoped to one table.
pub struct Orm<C: Connection> {
    conn: C,
    table: String,
    key_column: String,
    pub(crate) key_strategy: KeyStrategy,
    projection: Projection,
    joins: Vec<Join>,
    order_by: Vec<String>,
    group_by: Vec<String>,
    distinct: bool,
}

impl<C: Connection> Orm<C> {
    /// Create a builder for `table` with the default `id` key column.
    pub fn new(conn: C, table: &str) -> Self {
        Self::with_key(conn, table, "id")
    }

    /// Create a builder for `table` with an explicit key column.
    pub fn with_key(conn: C, table: &str, key_column: &str) -> Self {
        Self {
            conn,
            table: table.to_string(),
            key_column: key_column.to_string(),
            key_strategy: KeyStrategy::AutoIncrement,
            projection: Projection::All,
            joins: Vec::new(),
            order_by: Vec::new(),
            group_by: Vec::new(),
            distinct: false,
        }
    }

    /// The table this builder is scoped to.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The primary-key column name.
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub(crate) fn conn(&self) -> &C {
        &self.conn
    }

    // ==================== Clause accumulator ====================

    /// Set the key strategy.
    pub fn key_strategy(&mut self, strategy: KeyStrategy) -> &mut Self {
        self.key_strategy = strategy;
        self
    }

    /// Use `generator` for primary keys instead of auto-increment.
    pub fn set_primary_generator(
        &mut self,
        generator: impl Fn() -> Value + Send + Sync + 'static,
    ) -> &mut Self {
        self.key_strategy = KeyStrategy::generated(generator);
        self
    }

    /// Set the projection directly.
    pub fn set_projection(&mut self, projection: Projection) -> &mut Self {
        self.projection = projection;
        self
    }

    /// Select an ordered list of columns or expressions.
    pub fn select_columns(&mut self, cols: &[&str]) -> &mut Self {
        self.projection = Projection::Columns(cols.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Select qualified columns per table alias, in the given order.
    pub fn select_aliased(&mut self, tables: &[(&str, &[&str])]) -> &mut Self {
        self.projection = Projection::Aliased(
            tables
                .iter()
                .map(|(t, cols)| {
                    (
                        t.to_string(),
                        cols.iter().map(|c| c.to_string()).collect(),
                    )
                })
                .collect(),
        );
        self
    }

    /// Add an INNER JOIN with a raw ON predicate.
    pub fn join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(JoinKind::Inner, table, on)
    }

    /// Add a LEFT JOIN with a raw ON predicate.
    pub fn left_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(JoinKind::Left, table, on)
    }

    /// Add a RIGHT JOIN with a raw ON predicate.
    pub fn right_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(JoinKind::Right, table, on)
    }

    fn push_join(&mut self, kind: JoinKind, table: &str, on: &str) -> &mut Self {
        self.joins.push(Join {
            kind,
            table: table.to_string(),
            on: on.to_string(),
        });
        self
    }

    /// Append an ORDER BY fragment; repeated calls accumulate, comma-joined.
    pub fn order_by(&mut self, column: &str, order: Order) -> &mut Self {
        self.order_by.push(format!("{} {}", column, order.as_sql()));
        self
    }

    /// Append `column DESC`, the historical default direction.
    pub fn order_by_desc(&mut self, column: &str) -> &mut Self {
        self.order_by(column, Order::Desc)
    }

    /// Append a GROUP BY column; repeated calls accumulate, comma-joined.
    pub fn group_by(&mut self, column: &str) -> &mut Self {
        self.group_by.push(column.to_string());
        self
    }

    /// Render SELECTs with the DISTINCT keyword.
    pub fn set_distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// Reset all accumulated clause state to defaults, keeping only the
    /// connection, table, and key column. The supported way to reuse one
    /// builder across unrelated queries without leaking state.
    pub fn clear(&mut self) -> &mut Self {
        self.key_strategy = KeyStrategy::AutoIncrement;
        self.projection = Projection::All;
        self.joins.clear();
        self.order_by.clear();
        self.group_by.clear();
        self.distinct = false;
        self
    }

    /// Release the underlying connection.
    pub fn close(self) -> OrmResult<()> {
        self.conn.close()?;
        Ok(())
    }

    // ==================== Shared rendering ====================

    pub(crate) fn quoted_table(&self) -> String {
        quote_part(&self.table)
    }

    pub(crate) fn quoted_key(&self) -> String {
        quote_path(&self.key_column)
    }

    pub(crate) fn projection_sql(&self) -> String {
        self.projection.to_sql()
    }

    pub(crate) fn distinct_sql(&self) -> &'static str {
        if self.distinct { "DISTINCT " } else { "" }
    }

    /// `` `table` `` followed by the accumulated join clauses.
    pub(crate) fn from_sql(&self) -> String {
        let mut out = self.quoted_table();
        for join in &self.joins {
            out.push(' ');
            out.push_str(join.kind.as_sql());
            out.push(' ');
            out.push_str(&join.table);
            out.push_str(" ON ");
            out.push_str(&join.on);
        }
        out
    }

    /// Trailing ORDER BY / GROUP BY clauses in the renderer's fixed order.
    pub(crate) fn tail_sql(&self) -> String {
        let mut out = String::new();
        if !self.order_by.is_empty() {
            out.push_str(" ORDER BY ");
            out.push_str(&self.order_by.join(", "));
        }
        if !self.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            out.push_str(&self.group_by.join(", "));
        }
        out
    }

    /// A key value that is `Null` or zero counts as not supplied.
    pub(crate) fn require_key(&self, key: Option<Value>) -> OrmResult<Value> {
        match key {
            Some(v) if !v.is_unset() => Ok(v),
            _ => Err(OrmError::MissingKey),
        }
    }
}
