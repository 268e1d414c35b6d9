//! # sqlqb
//!
//! A validating SELECT query builder that renders MySQL-flavoured SQL text.
//!
//! ## Features
//!
//! - **Safe identifiers**: columns, tables and aliases must match `[A-Za-z_][A-Za-z0-9_]*`
//!   (optionally `table.column`) and are always backtick-quoted
//! - **Referential integrity**: duplicate names and joins onto unregistered tables are errors
//! - **Atomic mutators**: every call validates first, so a rejected call changes nothing
//! - **Deterministic rendering**: `sql()` is pure and can be called any number of times
//! - **Pluggable quoting**: string literals are quoted by a [`Connection`]
//! - **SQL logging**: optional `tracing` events carrying the rendered SQL
//!
//! ## Query Builder (qb)
//!
//! ```
//! use sqlqb::{Filter, QueryBuilder};
//!
//! let mut qb = QueryBuilder::new();
//! qb.select(["foo", "bar"])?
//!     .from("foobar")?
//!     .left_join("fizz", "foobar", ("id", "fizz_id"))?;
//! qb.where_eq("foo", "foo")?
//!     .or_where_group(|c| {
//!         c.where_eq("buzz", 1)?;
//!         Ok(())
//!     })?;
//!
//! assert_eq!(
//!     qb.sql(),
//!     "SELECT `foo`,`bar` FROM `foobar` LEFT JOIN `fizz` ON `fizz`.`id`=`foobar`.`fizz_id` \
//!      WHERE (`foo` = 'foo' OR (`buzz` = 1))"
//! );
//! # Ok::<(), sqlqb::QbError>(())
//! ```
//!
//! ## Logging
//!
//! Rendered SQL is emitted on the `sqlqb.sql` target when
//! [`BuilderConfig::log_sql`] is set; rejected calls are reported at `debug`
//! on `sqlqb.builder`. Install a `tracing` subscriber to see them.

pub mod config;
pub mod connection;
pub mod error;
pub mod ident;
pub mod literal;
pub mod qb;

pub use config::BuilderConfig;
pub use connection::{
    AnsiConnection, Connection, ConnectionProvider, MySqlConnection, default_connection,
};
pub use error::{QbError, QbResult};
pub use ident::Ident;
pub use literal::Literal;

// Re-export qb module for easy access
pub use qb::{
    Arg, Combinator, Conditions, Direction, Filter, JoinKind, JoinOn, Operator, QueryBuilder,
    TableRef, select, select_from,
};
