//! WHERE-clause vocabulary shared by [`QueryBuilder`](crate::QueryBuilder)
//! and the nested [`Conditions`] context handed to grouping closures.
//!
//! Every method validates all of its input first and only then attaches the
//! resulting predicates, so a failed call never changes the tree.
//! `where_*` methods combine with `AND`, `or_where_*` methods with `OR`.

use super::args::Arg;
use super::predicate::{Combinator, Operator, Predicate, PredicateNode, PredicateTree, Subject};
use super::rejected;
use crate::error::{QbError, QbResult};
use crate::ident::Ident;
use crate::literal::Literal;

/// Placement of the `%` wildcards of a LIKE predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Contains,
    StartsWith,
    EndsWith,
}

impl Pattern {
    fn wrap(&self, text: &str) -> String {
        match self {
            Pattern::Contains => format!("%{text}%"),
            Pattern::StartsWith => format!("{text}%"),
            Pattern::EndsWith => format!("%{text}"),
        }
    }
}

fn compare_node(column: &str, op: &str, value: Literal) -> QbResult<PredicateNode> {
    let column = Ident::parse(column)?;
    let op: Operator = op.parse()?;
    value.validate()?;
    Ok(Predicate::Compare {
        subject: Subject::Column(column),
        op,
        value,
    }
    .into())
}

fn raw_node(expression: &str, op: &str, value: Literal) -> QbResult<PredicateNode> {
    if expression.trim().is_empty() {
        return Err(QbError::invalid_argument("Raw expression cannot be empty"));
    }
    let op: Operator = op.parse()?;
    value.validate()?;
    Ok(Predicate::Compare {
        subject: Subject::Raw(expression.to_string()),
        op,
        value,
    }
    .into())
}

fn pattern_node(
    column: &str,
    pattern: Pattern,
    negated: bool,
    value: Literal,
) -> QbResult<PredicateNode> {
    let column = Ident::parse(column)?;
    let text = match value {
        Literal::Str(s) => s,
        Literal::Int(i) => i.to_string(),
        Literal::UInt(u) => u.to_string(),
        Literal::Float(f) if f.is_finite() => f.to_string(),
        other => return Err(QbError::type_error("string", other.type_name())),
    };
    Ok(Predicate::Compare {
        subject: Subject::Column(column),
        op: if negated {
            Operator::NotLike
        } else {
            Operator::Like
        },
        value: Literal::Str(pattern.wrap(&text)),
    }
    .into())
}

fn null_nodes(columns: Arg<()>, negated: bool) -> QbResult<Vec<PredicateNode>> {
    let columns = match columns {
        Arg::Single(c) => vec![c],
        Arg::Many(cs) if cs.is_empty() => {
            return Err(QbError::invalid_argument("Column list cannot be empty"));
        }
        Arg::Many(cs) => cs,
        Arg::Pairs(_) => {
            return Err(QbError::invalid_argument(
                "Null checks take a column or a list of columns, not a mapping",
            ));
        }
    };
    columns
        .iter()
        .map(|c| {
            Ok(Predicate::Null {
                column: Ident::parse(c)?,
                negated,
            }
            .into())
        })
        .collect()
}

fn in_node(
    column: &str,
    values: Vec<Literal>,
    negated: bool,
    max: Option<usize>,
) -> QbResult<PredicateNode> {
    let column = Ident::parse(column)?;
    if values.is_empty() {
        return Err(QbError::invalid_argument(format!(
            "IN list for '{}' cannot be empty",
            column.as_plain()
        )));
    }
    if let Some(max) = max {
        if values.len() > max {
            return Err(QbError::invalid_argument(format!(
                "IN list for '{}' has {} values, limit is {max}",
                column.as_plain(),
                values.len()
            )));
        }
    }
    for value in &values {
        value.validate()?;
    }
    Ok(Predicate::In {
        column,
        values,
        negated,
    }
    .into())
}

fn length_node(column: &str, op: &str, length: Literal) -> QbResult<PredicateNode> {
    let column = Ident::parse(column)?;
    let op: Operator = op.parse()?;
    if !matches!(length, Literal::Int(_) | Literal::UInt(_)) {
        return Err(QbError::invalid_argument(format!(
            "Length must be an integer, got {}",
            length.type_name()
        )));
    }
    Ok(Predicate::Compare {
        subject: Subject::Length(column),
        op,
        value: length,
    }
    .into())
}

/// Validate every pair before anything is attached.
fn map_nodes<I, K, V, F>(pairs: I, mut build: F) -> QbResult<Vec<PredicateNode>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    F: FnMut(&str, V) -> QbResult<PredicateNode>,
{
    let nodes = pairs
        .into_iter()
        .map(|(k, v)| build(k.as_ref(), v))
        .collect::<QbResult<Vec<_>>>()?;
    if nodes.is_empty() {
        return Err(QbError::invalid_argument("Mapping cannot be empty"));
    }
    Ok(nodes)
}

/// Nested contexts stay quiet; the outermost call reports the failure once.
fn reject<F: Filter>(target: &F, op: &'static str, err: QbError) -> QbError {
    if target.is_nested() {
        err
    } else {
        rejected(op, err)
    }
}

fn commit<'a, F: Filter>(
    target: &'a mut F,
    op: &'static str,
    combinator: Combinator,
    nodes: QbResult<Vec<PredicateNode>>,
) -> QbResult<&'a mut F> {
    let nodes = nodes.map_err(|e| reject(target, op, e))?;
    let tree = target.predicates_mut();
    for node in nodes {
        tree.attach(combinator, node);
    }
    Ok(target)
}

fn commit_group<'a, F, B>(
    target: &'a mut F,
    op: &'static str,
    combinator: Combinator,
    build: B,
) -> QbResult<&'a mut F>
where
    F: Filter,
    B: FnOnce(&mut Conditions) -> QbResult<()>,
{
    let mut nested = Conditions::new(target.max_in_list());
    build(&mut nested).map_err(|e| reject(target, op, e))?;
    if let Some(group) = nested.tree.into_closed_group() {
        target.predicates_mut().attach(combinator, group);
    }
    Ok(target)
}

macro_rules! pattern_methods {
    ($(
        $pattern:expr, $negated:expr,
        $and:ident, $and_map:ident, $or:ident, $or_map:ident, $sql:literal;
    )*) => {
        $(
            #[doc = concat!("`column ", $sql, "`, combined with AND.")]
            fn $and<V: Into<Literal>>(&mut self, column: &str, text: V) -> QbResult<&mut Self> {
                let node = pattern_node(column, $pattern, $negated, text.into());
                commit(self, stringify!($and), Combinator::And, node.map(|n| vec![n]))
            }

            #[doc = concat!(
                "`column ",
                $sql,
                "` for every `(column, text)` pair, combined with AND."
            )]
            fn $and_map<I, K, V>(&mut self, pairs: I) -> QbResult<&mut Self>
            where
                I: IntoIterator<Item = (K, V)>,
                K: AsRef<str>,
                V: Into<Literal>,
            {
                let nodes = map_nodes(pairs, |c, v| pattern_node(c, $pattern, $negated, v.into()));
                commit(self, stringify!($and_map), Combinator::And, nodes)
            }

            #[doc = concat!("`column ", $sql, "`, combined with OR.")]
            fn $or<V: Into<Literal>>(&mut self, column: &str, text: V) -> QbResult<&mut Self> {
                let node = pattern_node(column, $pattern, $negated, text.into());
                commit(self, stringify!($or), Combinator::Or, node.map(|n| vec![n]))
            }

            #[doc = concat!(
                "`column ",
                $sql,
                "` for every `(column, text)` pair, combined with OR."
            )]
            fn $or_map<I, K, V>(&mut self, pairs: I) -> QbResult<&mut Self>
            where
                I: IntoIterator<Item = (K, V)>,
                K: AsRef<str>,
                V: Into<Literal>,
            {
                let nodes = map_nodes(pairs, |c, v| pattern_node(c, $pattern, $negated, v.into()));
                commit(self, stringify!($or_map), Combinator::Or, nodes)
            }
        )*
    };
}

macro_rules! in_methods {
    ($(
        $negated:expr, $and:ident, $and_map:ident, $or:ident, $or_map:ident, $sql:literal;
    )*) => {
        $(
            #[doc = concat!(
                "`column ",
                $sql,
                " (...)`, combined with AND. The list must not be empty."
            )]
            fn $and<I, V>(&mut self, column: &str, values: I) -> QbResult<&mut Self>
            where
                I: IntoIterator<Item = V>,
                V: Into<Literal>,
            {
                let values = values.into_iter().map(Into::into).collect();
                let node = in_node(column, values, $negated, self.max_in_list());
                commit(self, stringify!($and), Combinator::And, node.map(|n| vec![n]))
            }

            #[doc = concat!(
                "`column ",
                $sql,
                " (...)` for every `(column, values)` pair, combined with AND."
            )]
            fn $and_map<I, K, L, V>(&mut self, pairs: I) -> QbResult<&mut Self>
            where
                I: IntoIterator<Item = (K, L)>,
                K: AsRef<str>,
                L: IntoIterator<Item = V>,
                V: Into<Literal>,
            {
                let max = self.max_in_list();
                let nodes = map_nodes(pairs, |c, vs| {
                    in_node(c, vs.into_iter().map(Into::into).collect(), $negated, max)
                });
                commit(self, stringify!($and_map), Combinator::And, nodes)
            }

            #[doc = concat!(
                "`column ",
                $sql,
                " (...)`, combined with OR. The list must not be empty."
            )]
            fn $or<I, V>(&mut self, column: &str, values: I) -> QbResult<&mut Self>
            where
                I: IntoIterator<Item = V>,
                V: Into<Literal>,
            {
                let values = values.into_iter().map(Into::into).collect();
                let node = in_node(column, values, $negated, self.max_in_list());
                commit(self, stringify!($or), Combinator::Or, node.map(|n| vec![n]))
            }

            #[doc = concat!(
                "`column ",
                $sql,
                " (...)` for every `(column, values)` pair, combined with OR."
            )]
            fn $or_map<I, K, L, V>(&mut self, pairs: I) -> QbResult<&mut Self>
            where
                I: IntoIterator<Item = (K, L)>,
                K: AsRef<str>,
                L: IntoIterator<Item = V>,
                V: Into<Literal>,
            {
                let max = self.max_in_list();
                let nodes = map_nodes(pairs, |c, vs| {
                    in_node(c, vs.into_iter().map(Into::into).collect(), $negated, max)
                });
                commit(self, stringify!($or_map), Combinator::Or, nodes)
            }
        )*
    };
}

/// Predicate-building methods.
///
/// # Example
/// ```
/// use sqlqb::{Filter, QueryBuilder};
///
/// let mut qb = QueryBuilder::new();
/// qb.select(["id", "name"])?.from("users")?;
/// qb.where_eq("status", "active")?
///     .or_where_group(|c| {
///         c.where_in("role", ["admin", "owner"])?;
///         c.where_not_null("verified_at")?;
///         Ok(())
///     })?;
/// assert_eq!(
///     qb.sql(),
///     "SELECT `id`,`name` FROM `users` WHERE (`status` = 'active' OR \
///      (`role` IN ('admin','owner') AND `verified_at` IS NOT NULL))"
/// );
/// # Ok::<(), sqlqb::QbError>(())
/// ```
pub trait Filter: Sized {
    /// The tree this context accumulates into.
    fn predicates_mut(&mut self) -> &mut PredicateTree;

    /// Upper bound on IN-list length, if any.
    fn max_in_list(&self) -> Option<usize> {
        None
    }

    /// Whether this context lives inside a grouping closure.
    fn is_nested(&self) -> bool {
        false
    }

    // ==================== Comparisons ====================

    /// `column = value`, combined with AND.
    fn where_eq<V: Into<Literal>>(&mut self, column: &str, value: V) -> QbResult<&mut Self> {
        let node = compare_node(column, "=", value.into());
        commit(self, "where_eq", Combinator::And, node.map(|n| vec![n]))
    }

    /// `column = value`, combined with OR.
    fn or_where_eq<V: Into<Literal>>(&mut self, column: &str, value: V) -> QbResult<&mut Self> {
        let node = compare_node(column, "=", value.into());
        commit(self, "or_where_eq", Combinator::Or, node.map(|n| vec![n]))
    }

    /// `column <op> value`, combined with AND.
    fn where_op<V: Into<Literal>>(
        &mut self,
        column: &str,
        op: &str,
        value: V,
    ) -> QbResult<&mut Self> {
        let node = compare_node(column, op, value.into());
        commit(self, "where_op", Combinator::And, node.map(|n| vec![n]))
    }

    /// `column <op> value`, combined with OR.
    fn or_where_op<V: Into<Literal>>(
        &mut self,
        column: &str,
        op: &str,
        value: V,
    ) -> QbResult<&mut Self> {
        let node = compare_node(column, op, value.into());
        commit(self, "or_where_op", Combinator::Or, node.map(|n| vec![n]))
    }

    /// `column = value` for every pair, each combined with AND.
    fn where_map<I, K, V>(&mut self, pairs: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Literal>,
    {
        let nodes = map_nodes(pairs, |c, v| compare_node(c, "=", v.into()));
        commit(self, "where_map", Combinator::And, nodes)
    }

    /// `column = value` for every pair, each combined with OR.
    fn or_where_map<I, K, V>(&mut self, pairs: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Literal>,
    {
        let nodes = map_nodes(pairs, |c, v| compare_node(c, "=", v.into()));
        commit(self, "or_where_map", Combinator::Or, nodes)
    }

    /// Raw left-hand side: `<expression> <op> value`, combined with AND.
    fn where_raw<V: Into<Literal>>(
        &mut self,
        expression: &str,
        op: &str,
        value: V,
    ) -> QbResult<&mut Self> {
        let node = raw_node(expression, op, value.into());
        commit(self, "where_raw", Combinator::And, node.map(|n| vec![n]))
    }

    /// Raw left-hand side: `<expression> <op> value`, combined with OR.
    fn or_where_raw<V: Into<Literal>>(
        &mut self,
        expression: &str,
        op: &str,
        value: V,
    ) -> QbResult<&mut Self> {
        let node = raw_node(expression, op, value.into());
        commit(self, "or_where_raw", Combinator::Or, node.map(|n| vec![n]))
    }

    // ==================== Grouping ====================

    /// Parenthesised group built by `build`, combined with AND.
    ///
    /// If `build` fails, nothing it added is kept. A closure that adds
    /// nothing leaves the tree unchanged.
    fn where_group<B>(&mut self, build: B) -> QbResult<&mut Self>
    where
        B: FnOnce(&mut Conditions) -> QbResult<()>,
    {
        commit_group(self, "where_group", Combinator::And, build)
    }

    /// Parenthesised group built by `build`, combined with OR.
    fn or_where_group<B>(&mut self, build: B) -> QbResult<&mut Self>
    where
        B: FnOnce(&mut Conditions) -> QbResult<()>,
    {
        commit_group(self, "or_where_group", Combinator::Or, build)
    }

    // ==================== NULL checks ====================

    /// `column IS NULL` for one or more columns, combined with AND.
    fn where_null(&mut self, columns: impl Into<Arg<()>>) -> QbResult<&mut Self> {
        commit(self, "where_null", Combinator::And, null_nodes(columns.into(), false))
    }

    /// `column IS NULL` for one or more columns, combined with OR.
    fn or_where_null(&mut self, columns: impl Into<Arg<()>>) -> QbResult<&mut Self> {
        commit(self, "or_where_null", Combinator::Or, null_nodes(columns.into(), false))
    }

    /// `column IS NOT NULL` for one or more columns, combined with AND.
    fn where_not_null(&mut self, columns: impl Into<Arg<()>>) -> QbResult<&mut Self> {
        commit(self, "where_not_null", Combinator::And, null_nodes(columns.into(), true))
    }

    /// `column IS NOT NULL` for one or more columns, combined with OR.
    fn or_where_not_null(&mut self, columns: impl Into<Arg<()>>) -> QbResult<&mut Self> {
        commit(self, "or_where_not_null", Combinator::Or, null_nodes(columns.into(), true))
    }

    // ==================== LIKE patterns ====================

    pattern_methods! {
        Pattern::Contains, false,
            where_contains, where_contains_map, or_where_contains, or_where_contains_map,
            "LIKE '%text%'";
        Pattern::Contains, true,
            where_not_contains, where_not_contains_map, or_where_not_contains,
            or_where_not_contains_map,
            "NOT LIKE '%text%'";
        Pattern::StartsWith, false,
            where_starts_with, where_starts_with_map, or_where_starts_with,
            or_where_starts_with_map,
            "LIKE 'text%'";
        Pattern::StartsWith, true,
            where_not_starts_with, where_not_starts_with_map, or_where_not_starts_with,
            or_where_not_starts_with_map,
            "NOT LIKE 'text%'";
        Pattern::EndsWith, false,
            where_ends_with, where_ends_with_map, or_where_ends_with, or_where_ends_with_map,
            "LIKE '%text'";
        Pattern::EndsWith, true,
            where_not_ends_with, where_not_ends_with_map, or_where_not_ends_with,
            or_where_not_ends_with_map,
            "NOT LIKE '%text'";
    }

    // ==================== IN lists ====================

    in_methods! {
        false, where_in, where_in_map, or_where_in, or_where_in_map, "IN";
        true, where_not_in, where_not_in_map, or_where_not_in, or_where_not_in_map, "NOT IN";
    }

    // ==================== LENGTH ====================

    /// `LENGTH(column) = length`, combined with AND. `length` must be an integer.
    fn where_length<V: Into<Literal>>(&mut self, column: &str, length: V) -> QbResult<&mut Self> {
        let node = length_node(column, "=", length.into());
        commit(self, "where_length", Combinator::And, node.map(|n| vec![n]))
    }

    /// `LENGTH(column) = length`, combined with OR.
    fn or_where_length<V: Into<Literal>>(
        &mut self,
        column: &str,
        length: V,
    ) -> QbResult<&mut Self> {
        let node = length_node(column, "=", length.into());
        commit(self, "or_where_length", Combinator::Or, node.map(|n| vec![n]))
    }

    /// `LENGTH(column) <op> length`, combined with AND.
    fn where_length_op<V: Into<Literal>>(
        &mut self,
        column: &str,
        op: &str,
        length: V,
    ) -> QbResult<&mut Self> {
        let node = length_node(column, op, length.into());
        commit(self, "where_length_op", Combinator::And, node.map(|n| vec![n]))
    }

    /// `LENGTH(column) <op> length`, combined with OR.
    fn or_where_length_op<V: Into<Literal>>(
        &mut self,
        column: &str,
        op: &str,
        length: V,
    ) -> QbResult<&mut Self> {
        let node = length_node(column, op, length.into());
        commit(self, "or_where_length_op", Combinator::Or, node.map(|n| vec![n]))
    }

    /// `LENGTH(column) = length` for every pair, combined with AND.
    fn where_length_map<I, K, V>(&mut self, pairs: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Literal>,
    {
        let nodes = map_nodes(pairs, |c, v| length_node(c, "=", v.into()));
        commit(self, "where_length_map", Combinator::And, nodes)
    }

    /// `LENGTH(column) = length` for every pair, combined with OR.
    fn or_where_length_map<I, K, V>(&mut self, pairs: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Literal>,
    {
        let nodes = map_nodes(pairs, |c, v| length_node(c, "=", v.into()));
        commit(self, "or_where_length_map", Combinator::Or, nodes)
    }
}

/// Nested context passed to [`Filter::where_group`] closures.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    tree: PredicateTree,
    max_in_list: Option<usize>,
}

impl Conditions {
    fn new(max_in_list: Option<usize>) -> Self {
        Self {
            tree: PredicateTree::new(),
            max_in_list,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl Filter for Conditions {
    fn predicates_mut(&mut self) -> &mut PredicateTree {
        &mut self.tree
    }

    fn max_in_list(&self) -> Option<usize> {
        self.max_in_list
    }

    fn is_nested(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::AnsiConnection;

    fn render(c: &mut Conditions) -> String {
        c.predicates_mut().to_sql(&AnsiConnection)
    }

    #[test]
    fn eq_and_op() {
        let mut c = Conditions::default();
        c.where_eq("a", 1).unwrap().where_op("b", "!=", "x").unwrap();
        assert_eq!(render(&mut c), "`a` = 1 AND `b` != 'x'");
    }

    #[test]
    fn map_uses_call_combinator() {
        let mut c = Conditions::default();
        c.or_where_map([("a", 1), ("b", 2)]).unwrap();
        assert_eq!(render(&mut c), "`a` = 1 OR `b` = 2");
    }

    #[test]
    fn patterns() {
        let mut c = Conditions::default();
        c.where_contains("a", "x").unwrap();
        c.where_not_starts_with("b", "y").unwrap();
        c.or_where_ends_with("c", "z").unwrap();
        assert_eq!(
            render(&mut c),
            "(`a` LIKE '%x%' AND `b` NOT LIKE 'y%') OR `c` LIKE '%z'"
        );
    }

    #[test]
    fn pattern_rejects_non_text() {
        let mut c = Conditions::default();
        let err = c.where_contains("a", true).unwrap_err();
        assert!(err.is_type_error());
        assert!(c.is_empty());
        assert!(c.where_contains("a", 12).is_ok());
    }

    #[test]
    fn null_list_shares_combinator() {
        let mut c = Conditions::default();
        c.or_where_null(["a", "b", "c"]).unwrap();
        assert_eq!(render(&mut c), "`a` IS NULL OR `b` IS NULL OR `c` IS NULL");
    }

    #[test]
    fn null_list_is_atomic() {
        let mut c = Conditions::default();
        let err = c.where_not_null(["a", "b c"]).unwrap_err();
        assert!(err.is_invalid_identifier());
        assert!(c.is_empty());
        assert!(c.where_null(Vec::<&str>::new()).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn in_list_rules() {
        let mut c = Conditions::default();
        let err = c.where_in("a", Vec::<i32>::new()).unwrap_err();
        assert!(err.is_invalid_argument());
        c.where_not_in("a", [1, 2]).unwrap();
        assert_eq!(render(&mut c), "`a` NOT IN (1,2)");
    }

    #[test]
    fn in_list_cap() {
        let mut c = Conditions::new(Some(2));
        assert!(c.where_in("a", [1, 2, 3]).unwrap_err().is_invalid_argument());
        assert!(c.where_in("a", [1, 2]).is_ok());
    }

    #[test]
    fn in_map_is_atomic() {
        let mut c = Conditions::default();
        let err = c
            .where_in_map(vec![("a", vec![1]), ("b", vec![])])
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(c.is_empty());
    }

    #[test]
    fn length_requires_integer() {
        let mut c = Conditions::default();
        assert!(c.where_length("a", "5").unwrap_err().is_invalid_argument());
        assert!(c.where_length_op("a", "=>", 5).unwrap_err().is_invalid_operator());
        c.where_length_op("a", ">=", 5).unwrap();
        assert_eq!(render(&mut c), "LENGTH(`a`) >= 5");
    }

    #[test]
    fn raw_subject() {
        let mut c = Conditions::default();
        c.where_raw("COALESCE(a, b)", ">", 1).unwrap();
        assert_eq!(render(&mut c), "COALESCE(a, b) > 1");
        assert!(c.where_raw("  ", "=", 1).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn nested_groups() {
        let mut c = Conditions::default();
        c.where_eq("a", 1).unwrap();
        c.or_where_group(|g| {
            g.where_eq("b", 2)?;
            g.where_group(|h| {
                h.where_eq("c", 3)?.or_where_eq("d", 4)?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        assert_eq!(
            render(&mut c),
            "`a` = 1 OR (`b` = 2 AND (`c` = 3 OR `d` = 4))"
        );
    }

    #[test]
    fn failed_group_leaves_tree_unchanged() {
        let mut c = Conditions::default();
        c.where_eq("a", 1).unwrap();
        let err = c
            .where_group(|g| {
                g.where_eq("b", 2)?;
                g.where_op("c", "bad", 3)?;
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_invalid_operator());
        assert_eq!(render(&mut c), "`a` = 1");
    }

    #[test]
    fn empty_group_is_noop() {
        let mut c = Conditions::default();
        c.where_group(|_| Ok(())).unwrap();
        assert!(c.is_empty());
    }
}
