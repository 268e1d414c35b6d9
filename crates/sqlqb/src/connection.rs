//! Connection collaborator.
//!
//! The builder only needs a connection for one thing: turning a string value
//! into a quoted SQL literal using the escaping rule of the target server.
//! Executing the rendered SQL is the caller's business.

use std::fmt::Debug;
use std::sync::Arc;

/// Escaping behaviour of a database connection.
pub trait Connection: Send + Sync + Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Quote `value` as a SQL string literal, including the surrounding quotes.
    fn quote_str(&self, value: &str) -> String;
}

/// Supplies a connection to builders that are not given one explicitly.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use sqlqb::{Connection, ConnectionProvider, MySqlConnection, QueryBuilder};
///
/// struct App;
///
/// impl ConnectionProvider for App {
///     fn connection(&self) -> Arc<dyn Connection> {
///         Arc::new(MySqlConnection)
///     }
/// }
///
/// let qb = QueryBuilder::from_provider(&App);
/// assert_eq!(qb.connection().name(), "mysql");
/// ```
pub trait ConnectionProvider {
    fn connection(&self) -> Arc<dyn Connection>;
}

impl<F> ConnectionProvider for F
where
    F: Fn() -> Arc<dyn Connection>,
{
    fn connection(&self) -> Arc<dyn Connection> {
        self()
    }
}

/// Standard SQL quoting: embedded `'` is doubled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiConnection;

impl Connection for AnsiConnection {
    fn name(&self) -> &str {
        "ansi"
    }

    fn quote_str(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for ch in value.chars() {
            if ch == '\'' {
                out.push('\'');
            }
            out.push(ch);
        }
        out.push('\'');
        out
    }
}

/// MySQL quoting: backslash escapes in the style of `mysql_real_escape_string`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnection;

impl Connection for MySqlConnection {
    fn name(&self) -> &str {
        "mysql"
    }

    fn quote_str(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for ch in value.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        out.push('\'');
        out
    }
}

/// The connection used when none is supplied.
pub fn default_connection() -> Arc<dyn Connection> {
    Arc::new(AnsiConnection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_doubles_quotes() {
        assert_eq!(AnsiConnection.quote_str("it's"), "'it''s'");
        assert_eq!(AnsiConnection.quote_str(""), "''");
        assert_eq!(AnsiConnection.quote_str("a\\b"), "'a\\b'");
    }

    #[test]
    fn mysql_backslash_escapes() {
        assert_eq!(MySqlConnection.quote_str("it's"), "'it\\'s'");
        assert_eq!(MySqlConnection.quote_str("a\\b"), "'a\\\\b'");
        assert_eq!(MySqlConnection.quote_str("line\nbreak"), "'line\\nbreak'");
        assert_eq!(MySqlConnection.quote_str("say \"hi\""), "'say \\\"hi\\\"'");
    }

    #[test]
    fn closure_is_a_provider() {
        let provider = || -> Arc<dyn Connection> { Arc::new(MySqlConnection) };
        assert_eq!(provider.connection().name(), "mysql");
    }
}
