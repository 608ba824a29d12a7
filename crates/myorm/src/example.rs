//! Condition builder for dynamic WHERE clauses.
//!
//! An [`Example`] is an ordered list of predicate terms, each joined to the
//! previous one with AND or OR. [`Example::build`] renders the terms into a
//! WHERE fragment with `?` placeholders and the bound values in exactly the
//! order the placeholders appear.
//!
//! ```
//! use myorm::{Example, Op};
//!
//! let (sql, params) = Example::new()
//!     .and_eq("status", "active")
//!     .and_gt("age", 18i64)
//!     .or_like("name", "Li%")
//!     .build()?;
//! assert_eq!(sql, "`status` = ? AND `age` > ? OR `name` LIKE ?");
//! assert_eq!(params.len(), 3);
//! # Ok::<(), myorm::OrmError>(())
//! ```

use crate::error::{OrmError, OrmResult};
use crate::ident::quote_path;
use crate::value::Value;

/// A predicate operator with its bound value(s).
///
/// LIKE patterns are passed through as-is: the caller supplies wildcard
/// characters, and no escaping is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// column = value
    Eq(Value),
    /// column != value
    Ne(Value),
    /// column > value
    Gt(Value),
    /// column >= value
    Gte(Value),
    /// column < value
    Lt(Value),
    /// column <= value
    Lte(Value),
    /// column LIKE pattern
    Like(Value),
    /// column NOT LIKE pattern
    NotLike(Value),
    /// column IN (values...)
    In(Vec<Value>),
    /// column NOT IN (values...)
    NotIn(Vec<Value>),
    /// column BETWEEN from AND to
    Between(Value, Value),
    /// column NOT BETWEEN from AND to
    NotBetween(Value, Value),
    /// column IS NULL
    IsNull,
    /// column IS NOT NULL
    IsNotNull,
}

impl Op {
    pub fn eq(val: impl Into<Value>) -> Self {
        Op::Eq(val.into())
    }

    pub fn ne(val: impl Into<Value>) -> Self {
        Op::Ne(val.into())
    }

    pub fn gt(val: impl Into<Value>) -> Self {
        Op::Gt(val.into())
    }

    pub fn gte(val: impl Into<Value>) -> Self {
        Op::Gte(val.into())
    }

    pub fn lt(val: impl Into<Value>) -> Self {
        Op::Lt(val.into())
    }

    pub fn lte(val: impl Into<Value>) -> Self {
        Op::Lte(val.into())
    }

    pub fn like(pattern: impl Into<Value>) -> Self {
        Op::Like(pattern.into())
    }

    pub fn not_like(pattern: impl Into<Value>) -> Self {
        Op::NotLike(pattern.into())
    }

    pub fn in_list<T: Into<Value>>(vals: impl IntoIterator<Item = T>) -> Self {
        Op::In(vals.into_iter().map(Into::into).collect())
    }

    pub fn not_in<T: Into<Value>>(vals: impl IntoIterator<Item = T>) -> Self {
        Op::NotIn(vals.into_iter().map(Into::into).collect())
    }

    pub fn between(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Op::Between(from.into(), to.into())
    }

    pub fn not_between(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Op::NotBetween(from.into(), to.into())
    }
}

/// Boolean connector joining a term to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connector {
    And,
    Or,
}

#[derive(Debug, Clone)]
struct Term {
    connector: Connector,
    column: String,
    op: Op,
}

/// A chainable WHERE-clause condition.
#[derive(Debug, Clone, Default)]
pub struct Example {
    terms: Vec<Term>,
}

impl Example {
    /// Create an empty condition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term joined with AND.
    pub fn and(mut self, column: &str, op: Op) -> Self {
        self.terms.push(Term {
            connector: Connector::And,
            column: column.to_string(),
            op,
        });
        self
    }

    /// Append a term joined with OR.
    pub fn or(mut self, column: &str, op: Op) -> Self {
        self.terms.push(Term {
            connector: Connector::Or,
            column: column.to_string(),
            op,
        });
        self
    }

    // ==================== Convenience terms ====================

    /// AND column = value
    pub fn and_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(column, Op::eq(value))
    }

    /// OR column = value
    pub fn or_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.or(column, Op::eq(value))
    }

    /// AND column != value
    pub fn and_ne(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(column, Op::ne(value))
    }

    /// AND column > value
    pub fn and_gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(column, Op::gt(value))
    }

    /// AND column >= value
    pub fn and_gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(column, Op::gte(value))
    }

    /// AND column < value
    pub fn and_lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(column, Op::lt(value))
    }

    /// AND column <= value
    pub fn and_lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.and(column, Op::lte(value))
    }

    /// AND column LIKE pattern (pattern passed through unescaped)
    pub fn and_like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.and(column, Op::like(pattern))
    }

    /// OR column LIKE pattern (pattern passed through unescaped)
    pub fn or_like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.or(column, Op::like(pattern))
    }

    /// AND column IN (values...)
    pub fn and_in<T: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = T>) -> Self {
        self.and(column, Op::in_list(values))
    }

    /// OR column IN (values...)
    pub fn or_in<T: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = T>) -> Self {
        self.or(column, Op::in_list(values))
    }

    /// AND column NOT IN (values...)
    pub fn and_not_in<T: Into<Value>>(
        self,
        column: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.and(column, Op::not_in(values))
    }

    /// AND column BETWEEN from AND to
    pub fn and_between(
        self,
        column: &str,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        self.and(column, Op::between(from, to))
    }

    /// AND column IS NULL
    pub fn and_is_null(self, column: &str) -> Self {
        self.and(column, Op::IsNull)
    }

    /// AND column IS NOT NULL
    pub fn and_is_not_null(self, column: &str) -> Self {
        self.and(column, Op::IsNotNull)
    }

    /// Number of predicate terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when no terms have been added.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Render the WHERE fragment and its parameters, placeholder order
    /// matching parameter order.
    ///
    /// Returns [`OrmError::EmptyCondition`] when no terms have been added.
    pub fn build(&self) -> OrmResult<(String, Vec<Value>)> {
        if self.terms.is_empty() {
            return Err(OrmError::EmptyCondition);
        }

        let mut sql = String::new();
        let mut params = Vec::new();

        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                sql.push_str(match term.connector {
                    Connector::And => " AND ",
                    Connector::Or => " OR ",
                });
            }
            render_term(term, &mut sql, &mut params);
        }

        Ok((sql, params))
    }
}

fn render_term(term: &Term, sql: &mut String, params: &mut Vec<Value>) {
    let col = quote_path(&term.column);
    match &term.op {
        Op::Eq(v) => render_cmp(sql, params, &col, "=", v),
        Op::Ne(v) => render_cmp(sql, params, &col, "!=", v),
        Op::Gt(v) => render_cmp(sql, params, &col, ">", v),
        Op::Gte(v) => render_cmp(sql, params, &col, ">=", v),
        Op::Lt(v) => render_cmp(sql, params, &col, "<", v),
        Op::Lte(v) => render_cmp(sql, params, &col, "<=", v),
        Op::Like(v) => render_cmp(sql, params, &col, "LIKE", v),
        Op::NotLike(v) => render_cmp(sql, params, &col, "NOT LIKE", v),
        Op::In(vals) => render_in(sql, params, &col, "IN", vals),
        Op::NotIn(vals) => render_in(sql, params, &col, "NOT IN", vals),
        Op::Between(from, to) => {
            sql.push_str(&format!("{col} BETWEEN ? AND ?"));
            params.push(from.clone());
            params.push(to.clone());
        }
        Op::NotBetween(from, to) => {
            sql.push_str(&format!("{col} NOT BETWEEN ? AND ?"));
            params.push(from.clone());
            params.push(to.clone());
        }
        Op::IsNull => sql.push_str(&format!("{col} IS NULL")),
        Op::IsNotNull => sql.push_str(&format!("{col} IS NOT NULL")),
    }
}

fn render_cmp(sql: &mut String, params: &mut Vec<Value>, col: &str, op: &str, value: &Value) {
    sql.push_str(&format!("{col} {op} ?"));
    params.push(value.clone());
}

fn render_in(sql: &mut String, params: &mut Vec<Value>, col: &str, op: &str, vals: &[Value]) {
    if vals.is_empty() {
        // Empty IN list is always false; empty NOT IN is always true.
        sql.push_str(if op == "IN" { "1=0" } else { "1=1" });
        return;
    }
    let placeholders = vec!["?"; vals.len()].join(", ");
    sql.push_str(&format!("{col} {op} ({placeholders})"));
    params.extend(vals.iter().cloned());
}
