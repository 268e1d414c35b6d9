//! SELECT query builder.

use super::args::Arg;
use super::columns::{SelectItem, SelectList};
use super::filter::Filter;
use super::order::{LimitSpec, Ordering};
use super::predicate::PredicateTree;
use super::rejected;
use super::tables::{JoinKind, JoinOn, TableGraph, TableRef};
use crate::config::BuilderConfig;
use crate::connection::{Connection, ConnectionProvider, default_connection};
use crate::error::{QbError, QbResult};
use std::fmt;
use std::sync::Arc;
use tracing::Level;

/// Incrementally built SELECT statement.
///
/// Every mutator validates its whole input before touching any state: on
/// `Err` the builder renders exactly what it rendered before the call.
///
/// # Example
/// ```
/// use sqlqb::{Filter, QueryBuilder};
///
/// let mut qb = QueryBuilder::new();
/// qb.select(["foo", "bar"])?
///     .from("foobar")?
///     .left_join("fizz", "foobar", ("id", "fizz_id"))?
///     .order_by("foo", Some("desc"))?
///     .limit(50, Some(50))?;
/// qb.where_eq("foo", "foo")?;
///
/// assert_eq!(
///     qb.sql(),
///     "SELECT `foo`,`bar` FROM `foobar` LEFT JOIN `fizz` ON `fizz`.`id`=`foobar`.`fizz_id` \
///      WHERE (`foo` = 'foo') ORDER BY `foo` DESC LIMIT 50,50"
/// );
/// # Ok::<(), sqlqb::QbError>(())
/// ```
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    /// Quotes string literals
    connection: Arc<dyn Connection>,
    /// Logging and limits
    config: BuilderConfig,
    /// SELECT list (empty renders `*`)
    columns: SelectList,
    /// FROM tables and JOIN clauses
    tables: TableGraph,
    /// WHERE tree
    predicates: PredicateTree,
    /// ORDER BY keys
    ordering: Ordering,
    /// LIMIT / OFFSET
    limit: Option<LimitSpec>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::with_connection(default_connection())
    }
}

impl QueryBuilder {
    /// Create an empty builder using the default (ANSI) connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder that quotes literals through `connection`.
    pub fn with_connection(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            config: BuilderConfig::default(),
            columns: SelectList::new(),
            tables: TableGraph::new(),
            predicates: PredicateTree::new(),
            ordering: Ordering::new(),
            limit: None,
        }
    }

    /// Create an empty builder with the connection handed out by `provider`.
    pub fn from_provider<P: ConnectionProvider + ?Sized>(provider: &P) -> Self {
        Self::with_connection(provider.connection())
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Swap the connection. Already-added predicates render with the new one.
    pub fn set_connection(&mut self, connection: Arc<dyn Connection>) -> &mut Self {
        self.connection = connection;
        self
    }

    // ==================== SELECT list ====================

    /// Replace the SELECT list.
    ///
    /// Accepts a column, a list of columns, or `(alias, column)` pairs.
    pub fn select(&mut self, columns: impl Into<Arg<String>>) -> QbResult<&mut Self> {
        let result =
            SelectList::parse(columns.into()).and_then(|items| self.columns.replace(items));
        result.map_err(|e| rejected("select", e))?;
        Ok(self)
    }

    /// Append to the SELECT list. Effective names must stay unique.
    pub fn add_select(&mut self, columns: impl Into<Arg<String>>) -> QbResult<&mut Self> {
        let result = SelectList::parse(columns.into()).and_then(|items| self.columns.append(items));
        result.map_err(|e| rejected("add_select", e))?;
        Ok(self)
    }

    /// Append a verbatim SQL expression under a mandatory alias.
    pub fn add_raw_select(&mut self, expression: &str, alias: &str) -> QbResult<&mut Self> {
        let result =
            SelectItem::raw(expression, alias).and_then(|item| self.columns.append(vec![item]));
        result.map_err(|e| rejected("add_raw_select", e))?;
        Ok(self)
    }

    // ==================== FROM ====================

    /// Add source tables: a name, a list of names, or `(alias, table)` pairs.
    pub fn from(&mut self, tables: impl Into<Arg<String>>) -> QbResult<&mut Self> {
        let result = parse_tables(tables.into()).and_then(|t| self.tables.add_tables(t));
        result.map_err(|e| rejected("from", e))?;
        Ok(self)
    }

    /// Add one source table under an alias.
    pub fn from_as(&mut self, table: &str, alias: &str) -> QbResult<&mut Self> {
        let result = TableRef::aliased(table, alias).and_then(|t| self.tables.add_tables(vec![t]));
        result.map_err(|e| rejected("from_as", e))?;
        Ok(self)
    }

    /// Add a verbatim FROM expression (usually a sub-query) under a mandatory alias.
    pub fn raw_from(&mut self, expression: &str, alias: &str) -> QbResult<&mut Self> {
        let result = TableRef::raw(expression, alias).and_then(|t| self.tables.add_tables(vec![t]));
        result.map_err(|e| rejected("raw_from", e))?;
        Ok(self)
    }

    // ==================== JOIN ====================

    /// Add a join of `target` onto the already-registered `local_table`.
    pub fn join(
        &mut self,
        kind: JoinKind,
        target: TableRef,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        self.tables
            .add_join(kind, target, local_table, &on.into())
            .map_err(|e| rejected("join", e))?;
        Ok(self)
    }

    fn join_with(
        &mut self,
        op: &'static str,
        kind: JoinKind,
        target: QbResult<TableRef>,
        local_table: &str,
        on: JoinOn,
    ) -> QbResult<&mut Self> {
        let result = target.and_then(|t| self.tables.add_join(kind, t, local_table, &on));
        result.map_err(|e| rejected(op, e))?;
        Ok(self)
    }

    /// `LEFT JOIN table ON table.foreign = local_table.field`
    pub fn left_join(
        &mut self,
        table: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        self.join_with("left_join", JoinKind::Left, TableRef::table(table), local_table, on.into())
    }

    /// `INNER JOIN table ON ...`
    pub fn inner_join(
        &mut self,
        table: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        self.join_with(
            "inner_join",
            JoinKind::Inner,
            TableRef::table(table),
            local_table,
            on.into(),
        )
    }

    /// `RIGHT JOIN table ON ...`
    pub fn right_join(
        &mut self,
        table: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        self.join_with(
            "right_join",
            JoinKind::Right,
            TableRef::table(table),
            local_table,
            on.into(),
        )
    }

    /// `LEFT JOIN table AS alias ON alias.foreign = local_table.field`
    pub fn left_join_as(
        &mut self,
        table: &str,
        alias: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        let target = TableRef::aliased(table, alias);
        self.join_with("left_join_as", JoinKind::Left, target, local_table, on.into())
    }

    pub fn inner_join_as(
        &mut self,
        table: &str,
        alias: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        let target = TableRef::aliased(table, alias);
        self.join_with("inner_join_as", JoinKind::Inner, target, local_table, on.into())
    }

    pub fn right_join_as(
        &mut self,
        table: &str,
        alias: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        let target = TableRef::aliased(table, alias);
        self.join_with("right_join_as", JoinKind::Right, target, local_table, on.into())
    }

    /// `LEFT JOIN <expression> AS alias ON ...`; `expression` is inserted verbatim.
    pub fn raw_left_join(
        &mut self,
        expression: &str,
        alias: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        let target = TableRef::raw(expression, alias);
        self.join_with("raw_left_join", JoinKind::Left, target, local_table, on.into())
    }

    pub fn raw_inner_join(
        &mut self,
        expression: &str,
        alias: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        let target = TableRef::raw(expression, alias);
        self.join_with("raw_inner_join", JoinKind::Inner, target, local_table, on.into())
    }

    pub fn raw_right_join(
        &mut self,
        expression: &str,
        alias: &str,
        local_table: &str,
        on: impl Into<JoinOn>,
    ) -> QbResult<&mut Self> {
        let target = TableRef::raw(expression, alias);
        self.join_with("raw_right_join", JoinKind::Right, target, local_table, on.into())
    }

    // ==================== ORDER BY / LIMIT ====================

    /// Append sort keys.
    ///
    /// `direction` (default `asc`) applies to plain columns; `(column,
    /// direction)` pairs carry their own. One bad key rejects the whole call.
    pub fn order_by(
        &mut self,
        columns: impl Into<Arg<String>>,
        direction: Option<&str>,
    ) -> QbResult<&mut Self> {
        let keys = Ordering::parse(columns.into(), direction, false)
            .map_err(|e| rejected("order_by", e))?;
        self.ordering.extend(keys);
        Ok(self)
    }

    /// Append verbatim sort expressions.
    pub fn raw_order_by(
        &mut self,
        expressions: impl Into<Arg<String>>,
        direction: Option<&str>,
    ) -> QbResult<&mut Self> {
        let keys = Ordering::parse(expressions.into(), direction, true)
            .map_err(|e| rejected("raw_order_by", e))?;
        self.ordering.extend(keys);
        Ok(self)
    }

    /// Set `LIMIT count` or `LIMIT offset,count`. Replaces any earlier limit.
    pub fn limit(&mut self, count: i64, offset: Option<i64>) -> QbResult<&mut Self> {
        let limit = LimitSpec::new(count, offset).map_err(|e| rejected("limit", e))?;
        self.limit = Some(limit);
        Ok(self)
    }

    // ==================== Inspection ====================

    /// Whether any WHERE predicate has been added.
    pub fn has_conditions(&self) -> bool {
        !self.predicates.is_empty()
    }

    /// Effective names of the SELECT list, in order.
    pub fn selected_names(&self) -> Vec<String> {
        self.columns.items().iter().map(SelectItem::effective_name).collect()
    }

    /// Effective names of all FROM tables and join targets, in order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.names().collect()
    }

    pub fn predicates(&self) -> &PredicateTree {
        &self.predicates
    }

    // ==================== Rendering ====================

    /// Render the statement. Pure apart from optional logging.
    pub fn sql(&self) -> String {
        let mut out = String::from("SELECT ");
        self.columns.write_sql(&mut out);

        if !self.tables.tables().is_empty() {
            out.push_str(" FROM ");
            self.tables.write_from(&mut out);
        }
        self.tables.write_joins(&mut out, self.connection.as_ref());

        if !self.predicates.is_empty() {
            out.push_str(" WHERE (");
            self.predicates.write_sql(&mut out, self.connection.as_ref());
            out.push(')');
        }

        if !self.ordering.is_empty() {
            out.push_str(" ORDER BY ");
            self.ordering.write_sql(&mut out);
        }

        if let Some(limit) = &self.limit {
            out.push_str(" LIMIT ");
            limit.write_sql(&mut out);
        }

        if self.config.log_sql {
            self.log_sql(&out);
        }
        out
    }

    fn log_sql(&self, sql: &str) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let shown = truncate_sql(sql, self.config.max_sql_length);
        emit_at_level!(
            self.config.sql_log_level,
            target: "sqlqb.sql",
            connection = self.connection.name(),
            sql = %shown,
            "sqlqb"
        );
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

impl Filter for QueryBuilder {
    fn predicates_mut(&mut self) -> &mut PredicateTree {
        &mut self.predicates
    }

    fn max_in_list(&self) -> Option<usize> {
        self.config.max_in_list
    }
}

/// Pairs are alias→table.
fn parse_tables(tables: Arg<String>) -> QbResult<Vec<TableRef>> {
    match tables {
        Arg::Single(t) => Ok(vec![TableRef::table(&t)?]),
        Arg::Many(ts) if ts.is_empty() => {
            Err(QbError::invalid_argument("Table list cannot be empty"))
        }
        Arg::Many(ts) => ts.iter().map(|t| TableRef::table(t)).collect(),
        Arg::Pairs(ps) if ps.is_empty() => {
            Err(QbError::invalid_argument("Table mapping cannot be empty"))
        }
        Arg::Pairs(ps) => ps.iter().map(|(alias, t)| TableRef::aliased(t, alias)).collect(),
    }
}

/// Cut at a char boundary at or below `max` bytes and mark with `...`.
pub(crate) fn truncate_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => {
            let mut end = max;
            while end > 0 && !sql.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &sql[..end])
        }
        _ => sql.to_string(),
    }
}
