//! SELECT query builder.
//!
//! The builder accumulates a structured description of a statement and renders
//! it deterministically with [`QueryBuilder::sql`].
//!
//! # Features
//!
//! - **Validated identifiers**: every column, table and alias is checked before it is stored
//! - **Referential checks**: duplicate names and joins onto unknown tables are rejected
//! - **Predicate tree**: AND/OR chains with parenthesised closure groups
//! - **Atomic mutators**: a rejected call leaves the builder untouched
//!
//! # Usage
//!
//! ```
//! use sqlqb::{qb, Filter};
//!
//! let mut users = qb::select_from("users")?;
//! users
//!     .select(["id", "email"])?
//!     .order_by("created_at", Some("desc"))?
//!     .limit(20, None)?;
//! users.where_eq("status", "active")?;
//!
//! assert_eq!(
//!     users.sql(),
//!     "SELECT `id`,`email` FROM `users` WHERE (`status` = 'active') \
//!      ORDER BY `created_at` DESC LIMIT 20"
//! );
//! # Ok::<(), sqlqb::QbError>(())
//! ```

mod args;
mod columns;
mod filter;
mod order;
mod predicate;
mod select;
mod tables;

pub use args::Arg;
pub use columns::{SelectItem, SelectList};
pub use filter::{Conditions, Filter};
pub use order::{Direction, LimitSpec, OrderKey, Ordering};
pub use predicate::{Combinator, Operator, Predicate, PredicateNode, PredicateTree, Subject};
pub use select::QueryBuilder;
pub use tables::{JoinClause, JoinKind, JoinOn, TableGraph, TableRef};

use crate::error::{QbError, QbResult};

/// Log a rejected call on `sqlqb.builder` and hand the error back.
pub(crate) fn rejected(op: &'static str, err: QbError) -> QbError {
    tracing::debug!(
        target: "sqlqb.builder",
        op,
        kind = err.kind(),
        error = %err,
        "sqlqb rejected call"
    );
    err
}

/// Create a builder with the given SELECT list.
///
/// # Example
/// ```
/// let qb = sqlqb::qb::select(["id", "name"])?;
/// assert_eq!(qb.sql(), "SELECT `id`,`name`");
/// # Ok::<(), sqlqb::QbError>(())
/// ```
pub fn select(columns: impl Into<Arg<String>>) -> QbResult<QueryBuilder> {
    let mut qb = QueryBuilder::new();
    qb.select(columns)?;
    Ok(qb)
}

/// Create a builder reading from `table`.
///
/// # Example
/// ```
/// let qb = sqlqb::qb::select_from("users")?;
/// assert_eq!(qb.sql(), "SELECT * FROM `users`");
/// # Ok::<(), sqlqb::QbError>(())
/// ```
pub fn select_from(table: &str) -> QbResult<QueryBuilder> {
    let mut qb = QueryBuilder::new();
    qb.from(table)?;
    Ok(qb)
}
