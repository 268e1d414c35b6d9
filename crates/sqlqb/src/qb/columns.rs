//! SELECT list.

use super::args::Arg;
use crate::error::{QbError, QbResult};
use crate::ident::{Ident, push_quoted};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectExpr {
    Column(Ident),
    Raw(String),
}

/// One output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    expression: SelectExpr,
    alias: Option<String>,
}

impl SelectItem {
    pub fn column(column: &str) -> QbResult<Self> {
        Ok(Self {
            expression: SelectExpr::Column(Ident::parse(column)?),
            alias: None,
        })
    }

    pub fn aliased(column: &str, alias: &str) -> QbResult<Self> {
        let expression = SelectExpr::Column(Ident::parse(column)?);
        Ident::parse_name(alias)?;
        Ok(Self {
            expression,
            alias: Some(alias.to_string()),
        })
    }

    /// Unvalidated SQL fragment; the alias is mandatory and validated.
    pub fn raw(expression: &str, alias: &str) -> QbResult<Self> {
        if alias.is_empty() {
            return Err(QbError::invalid_identifier("Raw select requires an alias"));
        }
        Ident::parse_name(alias)?;
        if expression.trim().is_empty() {
            return Err(QbError::invalid_argument("Raw select expression cannot be empty"));
        }
        Ok(Self {
            expression: SelectExpr::Raw(expression.to_string()),
            alias: Some(alias.to_string()),
        })
    }

    /// Alias if present, else the column as written.
    pub fn effective_name(&self) -> String {
        match (&self.alias, &self.expression) {
            (Some(alias), _) => alias.clone(),
            (None, SelectExpr::Column(ident)) => ident.as_plain(),
            (None, SelectExpr::Raw(expr)) => expr.clone(),
        }
    }

    fn write_sql(&self, out: &mut String) {
        match &self.expression {
            SelectExpr::Column(ident) => {
                ident.write_sql(out);
                if let Some(alias) = &self.alias {
                    if *alias != ident.as_plain() {
                        out.push_str(" AS ");
                        push_quoted(out, alias);
                    }
                }
            }
            SelectExpr::Raw(expr) => {
                out.push_str(expr);
                if let Some(alias) = &self.alias {
                    out.push_str(" AS ");
                    push_quoted(out, alias);
                }
            }
        }
    }
}

/// Ordered output columns with unique effective names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectList {
    items: Vec<SelectItem>,
}

impl SelectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SelectItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parse a `select`/`add_select` argument. Pairs are alias→column.
    pub(crate) fn parse(columns: Arg<String>) -> QbResult<Vec<SelectItem>> {
        match columns {
            Arg::Single(c) => Ok(vec![SelectItem::column(&c)?]),
            Arg::Many(cs) if cs.is_empty() => {
                Err(QbError::invalid_argument("Column list cannot be empty"))
            }
            Arg::Many(cs) => cs.iter().map(|c| SelectItem::column(c)).collect(),
            Arg::Pairs(ps) if ps.is_empty() => {
                Err(QbError::invalid_argument("Column mapping cannot be empty"))
            }
            Arg::Pairs(ps) => ps
                .iter()
                .map(|(alias, column)| SelectItem::aliased(column, alias))
                .collect(),
        }
    }

    /// Replace the list; `items` must be unique among themselves.
    pub(crate) fn replace(&mut self, items: Vec<SelectItem>) -> QbResult<()> {
        check_unique(&[], &items)?;
        self.items = items;
        Ok(())
    }

    /// Append `items`; all or none.
    pub(crate) fn append(&mut self, items: Vec<SelectItem>) -> QbResult<()> {
        check_unique(&self.items, &items)?;
        self.items.extend(items);
        Ok(())
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        if self.items.is_empty() {
            out.push('*');
            return;
        }
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            item.write_sql(out);
        }
    }
}

fn check_unique(existing: &[SelectItem], new: &[SelectItem]) -> QbResult<()> {
    for (i, item) in new.iter().enumerate() {
        let name = item.effective_name();
        let taken = existing.iter().chain(&new[..i]).any(|other| other.effective_name() == name);
        if taken {
            return Err(QbError::duplicate(format!("select '{name}'")));
        }
    }
    Ok(())
}
