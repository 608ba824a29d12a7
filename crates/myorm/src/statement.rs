//! Rendered statements: SQL text plus its ordered parameters.

use crate::value::Value;

/// A rendered statement, ready for execution or for deferral into a
/// [`Transaction`](crate::Transaction) batch.
///
/// Immutable once built. `params[n]` binds the n-th `?` placeholder in `sql`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    /// Create a statement from SQL text and its parameters.
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound parameters, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Number of `?` placeholders in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}
