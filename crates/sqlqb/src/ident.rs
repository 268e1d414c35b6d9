//! Identifier validation and quoting.
//!
//! This module provides [`Ident`], a column or table name that is optionally
//! qualified by a table (`table.column`).
//!
//! - Each segment must match `[A-Za-z_][A-Za-z0-9_]*`
//! - At most two segments are allowed
//! - Rendered backtick-quoted: `` `table`.`column` ``
//!
//! # Example
//! ```
//! use sqlqb::Ident;
//!
//! let c = Ident::parse("users.id")?;
//! assert_eq!(c.to_sql(), "`users`.`id`");
//! # Ok::<(), sqlqb::QbError>(())
//! ```

use crate::error::{QbError, QbResult};
use std::fmt;

/// A validated column or table reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    table: Option<String>,
    name: String,
}

impl Ident {
    /// Parse `name` or `table.name`.
    pub fn parse(s: &str) -> QbResult<Self> {
        if s.is_empty() {
            return Err(QbError::invalid_identifier("Identifier cannot be empty"));
        }

        let mut segments = s.split('.');
        let first = segments.next().unwrap_or_default();
        let second = segments.next();
        if segments.next().is_some() {
            return Err(QbError::invalid_identifier(format!(
                "Identifier '{s}' has more than two segments"
            )));
        }

        validate_segment(s, first)?;
        match second {
            None => Ok(Self {
                table: None,
                name: first.to_string(),
            }),
            Some(name) => {
                validate_segment(s, name)?;
                Ok(Self {
                    table: Some(first.to_string()),
                    name: name.to_string(),
                })
            }
        }
    }

    /// Parse an unqualified name (table names, aliases, join fields).
    pub fn parse_name(s: &str) -> QbResult<Self> {
        if s.contains('.') {
            return Err(QbError::invalid_identifier(format!(
                "Identifier '{s}' must not be table-qualified"
            )));
        }
        Self::parse(s)
    }

    /// Build `qualifier.name` from two already validated idents.
    pub(crate) fn qualified(table: &Ident, column: &Ident) -> Self {
        Self {
            table: Some(table.name.clone()),
            name: column.name.clone(),
        }
    }

    /// The table qualifier, if any.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The last segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_qualified(&self) -> bool {
        self.table.is_some()
    }

    /// The identifier as written, without quoting (`table.name` or `name`).
    pub fn as_plain(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table, self.name),
            None => self.name.clone(),
        }
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::with_capacity(
            self.name.len() + 2 + self.table.as_ref().map_or(0, |t| t.len() + 3),
        );
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        if let Some(table) = &self.table {
            push_quoted(out, table);
            out.push('.');
        }
        push_quoted(out, &self.name);
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

fn validate_segment(full: &str, segment: &str) -> QbResult<()> {
    let mut chars = segment.chars();
    match chars.next() {
        None => {
            return Err(QbError::invalid_identifier(format!(
                "Empty identifier segment in '{full}'"
            )));
        }
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        Some(c) => {
            return Err(QbError::invalid_identifier(format!(
                "Invalid identifier start character '{c}' in '{full}'"
            )));
        }
    }
    for c in chars {
        if !(c == '_' || c.is_ascii_alphanumeric()) {
            return Err(QbError::invalid_identifier(format!(
                "Invalid character '{c}' in identifier '{full}'"
            )));
        }
    }
    Ok(())
}

pub(crate) fn push_quoted(out: &mut String, segment: &str) {
    out.push('`');
    out.push_str(segment);
    out.push('`');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Ident::parse("users").unwrap();
        assert_eq!(ident.to_sql(), "`users`");
        assert!(!ident.is_qualified());
    }

    #[test]
    fn ident_dotted() {
        let ident = Ident::parse("users.id").unwrap();
        assert_eq!(ident.to_sql(), "`users`.`id`");
        assert_eq!(ident.table(), Some("users"));
        assert_eq!(ident.name(), "id");
        assert_eq!(ident.as_plain(), "users.id");
    }

    #[test]
    fn ident_underscore_and_digits() {
        let ident = Ident::parse("_tmp_2").unwrap();
        assert_eq!(ident.to_sql(), "`_tmp_2`");
    }

    #[test]
    fn ident_rejects_three_parts() {
        let err = Ident::parse("db.users.id").unwrap_err();
        assert!(err.is_invalid_identifier());
    }

    #[test]
    fn ident_rejects_empty() {
        assert!(Ident::parse("").unwrap_err().is_invalid_identifier());
    }

    #[test]
    fn ident_rejects_start_digit() {
        assert!(Ident::parse("1table").is_err());
    }

    #[test]
    fn ident_rejects_space() {
        assert!(Ident::parse("my table").is_err());
    }

    #[test]
    fn ident_rejects_dollar_and_backtick() {
        assert!(Ident::parse("var$1").is_err());
        assert!(Ident::parse("a`b").is_err());
    }

    #[test]
    fn ident_rejects_empty_segments() {
        assert!(Ident::parse(".id").is_err());
        assert!(Ident::parse("users.").is_err());
        assert!(Ident::parse("users..id").is_err());
    }

    #[test]
    fn parse_name_rejects_qualified() {
        assert!(Ident::parse_name("users").is_ok());
        assert!(Ident::parse_name("users.id").unwrap_err().is_invalid_identifier());
    }
}
