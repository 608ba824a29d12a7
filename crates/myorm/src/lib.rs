//! # myorm
//!
//! A lightweight, driver-agnostic SQL access layer for MySQL-flavored
//! databases.
//!
//! ## Features
//!
//! - **Fluent builders**: one [`Orm`] per table accumulates projection,
//!   joins, ordering, grouping, and distinct state across chained calls
//! - **Condition sub-language**: [`Example`] composes AND/OR predicates into
//!   a WHERE fragment with parameters in placeholder order
//! - **Rendered statements first**: every operation has a pure `*_stmt`
//!   renderer producing a [`Statement`], so statements can run immediately
//!   or be deferred into a [`Transaction`] batch with a single commit point
//! - **Safe defaults**: UPDATE/DELETE by condition refuse an empty condition;
//!   usage errors are raised before any SQL reaches the driver
//! - **Bring your own driver**: the [`Connection`]/[`Cursor`] traits are the
//!   only contract; rows come back as ordered column→value mappings
//!
//! ## Usage
//!
//! ```ignore
//! use myorm::{Example, Orm, Order, Transaction, row};
//!
//! let mut user = Orm::new(&conn, "user");
//!
//! // INSERT, returning the primary key
//! let id = user.insert_one(row! { "name" => "Alice", "age" => 30i64 })?;
//!
//! // SELECT with accumulated clauses
//! let adults = user
//!     .order_by("age", Order::Desc)
//!     .select_by_example(&Example::new().and_gte("age", 18i64))?;
//!
//! // Deferred batch: all-or-nothing
//! Transaction::new(&conn)
//!     .add(user.insert_stmt(row! { "name" => "Bob" })?)
//!     .add(user.delete_by_primary_key_stmt(id))
//!     .commit()?;
//! ```

pub mod driver;
pub mod error;
pub mod example;
pub mod orm;
pub mod query;
pub mod row;
pub mod statement;
pub mod transaction;
pub mod value;

mod exec;
mod ident;

pub use driver::{Connection, Cursor, DriverError, DriverResult};
pub use error::{OrmError, OrmResult};
pub use example::{Example, Op};
pub use orm::{Aggregate, JoinKind, KeyStrategy, Order, Orm, Projection};
pub use query::{Query, query};
pub use row::Row;
pub use statement::Statement;
pub use transaction::{CommitResult, Transaction};
pub use value::Value;
