//! Predicate tree for WHERE and JOIN ... ON conditions.
//!
//! A tree is grown one call at a time. Each call combines the tree built so far
//! with one new node under a single combinator:
//!
//! - if the root is an open group with the same combinator, the node is appended
//! - otherwise the old root and the new node become the two children of a new group
//!
//! Groups created from a closure are *closed*: nothing is ever appended to
//! them and they always render inside parentheses.

use crate::connection::Connection;
use crate::error::{QbError, QbResult};
use crate::ident::Ident;
use crate::literal::Literal;
use std::fmt;
use std::str::FromStr;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    /// `<>`, kept distinct from `!=` so it renders as written.
    NotEq,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
    NotLike,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::NotEq => "<>",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
        }
    }

    /// Keyword operators need surrounding spaces even in compact output.
    fn is_keyword(&self) -> bool {
        matches!(self, Operator::Like | Operator::NotLike)
    }
}

impl FromStr for Operator {
    type Err = QbError;

    fn from_str(s: &str) -> QbResult<Self> {
        let op = match s.trim() {
            "=" => Operator::Eq,
            "!=" => Operator::Ne,
            "<>" => Operator::NotEq,
            ">" => Operator::Gt,
            "<" => Operator::Lt,
            ">=" => Operator::Gte,
            "<=" => Operator::Lte,
            other => {
                let words: Vec<&str> = other.split_whitespace().collect();
                match words.as_slice() {
                    [w] if w.eq_ignore_ascii_case("LIKE") => Operator::Like,
                    [n, w] if n.eq_ignore_ascii_case("NOT") && w.eq_ignore_ascii_case("LIKE") => {
                        Operator::NotLike
                    }
                    _ => return Err(QbError::InvalidOperator(s.to_string())),
                }
            }
        };
        Ok(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How sibling predicates are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }

    fn separator(&self) -> &'static str {
        match self {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
        }
    }
}

impl FromStr for Combinator {
    type Err = QbError;

    fn from_str(s: &str) -> QbResult<Self> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("AND") {
            Ok(Combinator::And)
        } else if t.eq_ignore_ascii_case("OR") {
            Ok(Combinator::Or)
        } else {
            Err(QbError::InvalidOperator(s.to_string()))
        }
    }
}

/// Left-hand side of a value comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    Column(Ident),
    /// Verbatim SQL, not validated.
    Raw(String),
    /// `LENGTH(column)`
    Length(Ident),
}

impl Subject {
    fn write_sql(&self, out: &mut String) {
        match self {
            Subject::Column(ident) => ident.write_sql(out),
            Subject::Raw(expr) => out.push_str(expr),
            Subject::Length(ident) => {
                out.push_str("LENGTH(");
                ident.write_sql(out);
                out.push(')');
            }
        }
    }
}

/// A single condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `subject op literal`
    Compare {
        subject: Subject,
        op: Operator,
        value: Literal,
    },
    /// `column IS [NOT] NULL`
    Null { column: Ident, negated: bool },
    /// `column [NOT] IN (v1,v2,...)`, never empty.
    In {
        column: Ident,
        values: Vec<Literal>,
        negated: bool,
    },
    /// Column-to-column comparison used by join conditions: `a.x=b.y`
    Columns {
        left: Ident,
        op: Operator,
        right: Ident,
    },
}

impl Predicate {
    fn write_sql(&self, out: &mut String, conn: &dyn Connection) {
        match self {
            Predicate::Compare { subject, op, value } => {
                subject.write_sql(out);
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                value.write_sql(out, conn);
            }
            Predicate::Null { column, negated } => {
                column.write_sql(out);
                out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Predicate::In {
                column,
                values,
                negated,
            } => {
                column.write_sql(out);
                out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    value.write_sql(out, conn);
                }
                out.push(')');
            }
            Predicate::Columns { left, op, right } => {
                left.write_sql(out);
                if op.is_keyword() {
                    out.push(' ');
                    out.push_str(op.as_str());
                    out.push(' ');
                } else {
                    out.push_str(op.as_str());
                }
                right.write_sql(out);
            }
        }
    }
}

/// A node of the predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateNode {
    Leaf(Predicate),
    Group {
        combinator: Combinator,
        children: Vec<PredicateNode>,
        /// Built from a closure: closed to further appends, always parenthesised.
        closed: bool,
    },
}

impl PredicateNode {
    fn write_sql(&self, out: &mut String, conn: &dyn Connection, top: bool) {
        match self {
            PredicateNode::Leaf(p) => p.write_sql(out, conn),
            PredicateNode::Group {
                combinator,
                children,
                closed,
            } => {
                let parens = !top || *closed;
                if parens {
                    out.push('(');
                }
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(combinator.separator());
                    }
                    child.write_sql(out, conn, false);
                }
                if parens {
                    out.push(')');
                }
            }
        }
    }
}

impl From<Predicate> for PredicateNode {
    fn from(p: Predicate) -> Self {
        PredicateNode::Leaf(p)
    }
}

/// An accumulated condition tree; empty until the first predicate is added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateTree {
    root: Option<PredicateNode>,
}

impl PredicateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&PredicateNode> {
        self.root.as_ref()
    }

    /// Combine the current tree with `node` under `combinator`.
    pub(crate) fn attach(&mut self, combinator: Combinator, node: PredicateNode) {
        self.root = Some(match self.root.take() {
            None => node,
            Some(PredicateNode::Group {
                combinator: c,
                mut children,
                closed: false,
            }) if c == combinator => {
                children.push(node);
                PredicateNode::Group {
                    combinator: c,
                    children,
                    closed: false,
                }
            }
            Some(existing) => PredicateNode::Group {
                combinator,
                children: vec![existing, node],
                closed: false,
            },
        });
    }

    /// Turn the tree into a closed group, ready to be attached to a parent.
    pub(crate) fn into_closed_group(self) -> Option<PredicateNode> {
        match self.root? {
            PredicateNode::Group {
                combinator,
                children,
                closed: false,
            } => Some(PredicateNode::Group {
                combinator,
                children,
                closed: true,
            }),
            node => Some(PredicateNode::Group {
                combinator: Combinator::And,
                children: vec![node],
                closed: true,
            }),
        }
    }

    /// Render without the surrounding `WHERE (...)`.
    pub fn to_sql(&self, conn: &dyn Connection) -> String {
        let mut out = String::new();
        self.write_sql(&mut out, conn);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String, conn: &dyn Connection) {
        if let Some(root) = &self.root {
            root.write_sql(out, conn, true);
        }
    }
}
