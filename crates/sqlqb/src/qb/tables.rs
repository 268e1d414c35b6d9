//! FROM tables and JOIN clauses.

use super::predicate::{Combinator, Operator, Predicate, PredicateTree};
use crate::connection::Connection;
use crate::error::{QbError, QbResult};
use crate::ident::{Ident, push_quoted};

/// JOIN flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    Inner,
    Right,
}

impl JoinKind {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

/// A source table: a validated name, or raw sub-query text with an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    expression: String,
    alias: Option<String>,
    raw: bool,
}

impl TableRef {
    /// A plain table name.
    pub fn table(name: &str) -> QbResult<Self> {
        Ident::parse_name(name)?;
        Ok(Self {
            expression: name.to_string(),
            alias: None,
            raw: false,
        })
    }

    /// A plain table name with an alias.
    pub fn aliased(name: &str, alias: &str) -> QbResult<Self> {
        Ident::parse_name(name)?;
        Ident::parse_name(alias)?;
        Ok(Self {
            expression: name.to_string(),
            alias: Some(alias.to_string()),
            raw: false,
        })
    }

    /// Verbatim SQL (typically a parenthesised sub-query). The alias is mandatory.
    pub fn raw(expression: &str, alias: &str) -> QbResult<Self> {
        if expression.trim().is_empty() {
            return Err(QbError::invalid_argument("Raw table expression cannot be empty"));
        }
        Ident::parse_name(alias)?;
        Ok(Self {
            expression: expression.to_string(),
            alias: Some(alias.to_string()),
            raw: true,
        })
    }

    /// The name other clauses refer to this table by.
    pub fn effective_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.expression)
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    fn write_sql(&self, out: &mut String) {
        if self.raw {
            out.push_str(&self.expression);
        } else {
            push_quoted(out, &self.expression);
        }
        if let Some(alias) = &self.alias {
            if self.raw || alias != &self.expression {
                out.push_str(" AS ");
                push_quoted(out, alias);
            }
        }
    }
}

/// Join condition as supplied by the caller, validated when the join is added.
///
/// Field names are unqualified: the foreign field belongs to the joined table,
/// the local field to the local table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOn {
    /// `join.foreign <op> local.field`, `=` when no operator is given.
    Pair {
        foreign: String,
        op: Option<String>,
        local: String,
    },
    /// Several `join.foreign = local.field` pairs under one combinator.
    Pairs {
        pairs: Vec<(String, String)>,
        combinator: Combinator,
    },
}

impl JoinOn {
    pub fn eq(foreign: &str, local: &str) -> Self {
        JoinOn::Pair {
            foreign: foreign.to_string(),
            op: None,
            local: local.to_string(),
        }
    }

    pub fn op(foreign: &str, op: &str, local: &str) -> Self {
        JoinOn::Pair {
            foreign: foreign.to_string(),
            op: Some(op.to_string()),
            local: local.to_string(),
        }
    }

    pub fn pairs<I, F, L>(pairs: I, combinator: Combinator) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: Into<String>,
        L: Into<String>,
    {
        JoinOn::Pairs {
            pairs: pairs
                .into_iter()
                .map(|(f, l)| (f.into(), l.into()))
                .collect(),
            combinator,
        }
    }

    /// All pairs must match.
    pub fn all<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: Into<String>,
        L: Into<String>,
    {
        Self::pairs(pairs, Combinator::And)
    }

    /// Any pair may match.
    pub fn any<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: Into<String>,
        L: Into<String>,
    {
        Self::pairs(pairs, Combinator::Or)
    }

    /// Build the ON tree. Fields are checked before the operator.
    fn build(&self, join: &Ident, local: &Ident) -> QbResult<PredicateTree> {
        let (pairs, op, combinator) = match self {
            JoinOn::Pair { foreign, op, local } => (
                vec![(foreign.as_str(), local.as_str())],
                op.as_deref(),
                Combinator::And,
            ),
            JoinOn::Pairs { pairs, combinator } => {
                if pairs.is_empty() {
                    return Err(QbError::invalid_argument("Join field mapping cannot be empty"));
                }
                (
                    pairs.iter().map(|(f, l)| (f.as_str(), l.as_str())).collect(),
                    None,
                    *combinator,
                )
            }
        };

        let fields = pairs
            .iter()
            .map(|(f, l)| Ok((Ident::parse_name(f)?, Ident::parse_name(l)?)))
            .collect::<QbResult<Vec<_>>>()?;
        let op: Operator = match op {
            Some(op) => op.parse()?,
            None => Operator::Eq,
        };

        let mut tree = PredicateTree::new();
        for (foreign, local_field) in &fields {
            tree.attach(
                combinator,
                Predicate::Columns {
                    left: Ident::qualified(join, foreign),
                    op,
                    right: Ident::qualified(local, local_field),
                }
                .into(),
            );
        }
        Ok(tree)
    }
}

impl From<(&str, &str)> for JoinOn {
    fn from((foreign, local): (&str, &str)) -> Self {
        JoinOn::eq(foreign, local)
    }
}

impl From<(&str, &str, &str)> for JoinOn {
    fn from((foreign, op, local): (&str, &str, &str)) -> Self {
        JoinOn::op(foreign, op, local)
    }
}

/// A validated join clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub target: TableRef,
    pub on: PredicateTree,
}

impl JoinClause {
    fn write_sql(&self, out: &mut String, conn: &dyn Connection) {
        out.push_str(self.kind.to_sql());
        out.push(' ');
        self.target.write_sql(out);
        out.push_str(" ON ");
        self.on.write_sql(out, conn);
    }
}

/// Tables and joins registered on a builder, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableGraph {
    tables: Vec<TableRef>,
    joins: Vec<JoinClause>,
}

impl TableGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is already used by a table or join target.
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables
            .iter()
            .map(TableRef::effective_name)
            .chain(self.joins.iter().map(|j| j.target.effective_name()))
    }

    pub fn tables(&self) -> &[TableRef] {
        &self.tables
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    /// Add source tables; all or none.
    pub(crate) fn add_tables(&mut self, new: Vec<TableRef>) -> QbResult<()> {
        for (i, table) in new.iter().enumerate() {
            let name = table.effective_name();
            if self.contains(name) || new[..i].iter().any(|t| t.effective_name() == name) {
                return Err(QbError::duplicate(format!("table '{name}'")));
            }
        }
        self.tables.extend(new);
        Ok(())
    }

    /// Validate and add a join.
    ///
    /// Checks run in order: unknown local table, duplicate target, field
    /// names, operator. A target that collides with the local table itself
    /// is a duplicate, since the local table is then registered.
    pub(crate) fn add_join(
        &mut self,
        kind: JoinKind,
        target: TableRef,
        local_table: &str,
        on: &JoinOn,
    ) -> QbResult<()> {
        let join_name = target.effective_name();
        if !self.contains(local_table) {
            return Err(QbError::orphaned_join(join_name, local_table));
        }
        if self.contains(join_name) {
            return Err(QbError::duplicate(format!("table '{join_name}'")));
        }
        let local = Ident::parse_name(local_table)?;
        let join = Ident::parse_name(join_name)?;
        let on = on.build(&join, &local)?;
        self.joins.push(JoinClause { kind, target, on });
        Ok(())
    }

    pub(crate) fn write_from(&self, out: &mut String) {
        for (i, table) in self.tables.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            table.write_sql(out);
        }
    }

    pub(crate) fn write_joins(&self, out: &mut String, conn: &dyn Connection) {
        for join in &self.joins {
            out.push(' ');
            join.write_sql(out, conn);
        }
    }
}
