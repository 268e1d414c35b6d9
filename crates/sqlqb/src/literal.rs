//! Typed values serialized directly into SQL text.
//!
//! Values are not bound as parameters: they are rendered as literals when
//! [`QueryBuilder::sql`](crate::QueryBuilder::sql) runs, string escaping is
//! delegated to the active [`Connection`]. Callers that pass untrusted input
//! rely entirely on that escaping rule.

use crate::connection::Connection;
use crate::error::{QbError, QbResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A value that can appear on the right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`; smaller values are always `Int`.
    UInt(u64),
    Float(f64),
    Str(String),
    /// Rendered as a quoted `YYYY-MM-DD HH:MM:SS` string.
    DateTime(NaiveDateTime),
}

impl Literal {
    /// Human readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Bool(_) => "bool",
            Literal::Int(_) | Literal::UInt(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Str(_) => "string",
            Literal::DateTime(_) => "datetime",
        }
    }

    /// Reject values that have no SQL literal form.
    pub fn validate(&self) -> QbResult<()> {
        match self {
            Literal::Float(f) if !f.is_finite() => Err(QbError::invalid_argument(format!(
                "Float value {f} has no SQL literal form"
            ))),
            _ => Ok(()),
        }
    }

    /// Render as SQL using `conn` for string escaping.
    pub fn to_sql(&self, conn: &dyn Connection) -> String {
        let mut out = String::new();
        self.write_sql(&mut out, conn);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String, conn: &dyn Connection) {
        match self {
            Literal::Null => out.push_str("NULL"),
            Literal::Bool(true) => out.push('1'),
            Literal::Bool(false) => out.push('0'),
            Literal::Int(i) => out.push_str(&i.to_string()),
            Literal::UInt(u) => out.push_str(&u.to_string()),
            Literal::Float(f) => out.push_str(&f.to_string()),
            Literal::Str(s) => out.push_str(&conn.quote_str(s)),
            Literal::DateTime(dt) => {
                out.push_str(&conn.quote_str(&dt.format(DATETIME_FORMAT).to_string()))
            }
        }
    }

    /// Convert a JSON array into a literal list.
    pub fn list_from_json(value: &Value) -> QbResult<Vec<Literal>> {
        match value {
            Value::Array(items) => items.iter().map(Literal::try_from).collect(),
            other => Err(QbError::type_error("array", json_type_name(other))),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<&Value> for Literal {
    type Error = QbError;

    fn try_from(value: &Value) -> QbResult<Self> {
        match value {
            Value::Null => Ok(Literal::Null),
            Value::Bool(b) => Ok(Literal::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Literal::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Literal::UInt(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(Literal::Float(f))
                } else {
                    Err(QbError::type_error("number", n.to_string()))
                }
            }
            Value::String(s) => Ok(Literal::Str(s.clone())),
            other => Err(QbError::type_error("scalar", json_type_name(other))),
        }
    }
}

impl TryFrom<Value> for Literal {
    type Error = QbError;

    fn try_from(value: Value) -> QbResult<Self> {
        Literal::try_from(&value)
    }
}

macro_rules! literal_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(value: $t) -> Self {
                    Literal::Int(i64::from(value))
                }
            }
        )*
    };
}

literal_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Literal::UInt(value), Literal::Int)
    }
}

impl From<usize> for Literal {
    fn from(value: usize) -> Self {
        Literal::from(value as u64)
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Literal::Float(f64::from(value))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<&String> for Literal {
    fn from(value: &String) -> Self {
        Literal::Str(value.clone())
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(value: NaiveDateTime) -> Self {
        Literal::DateTime(value)
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Literal::DateTime(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Literal {
    fn from(value: DateTime<Tz>) -> Self {
        Literal::DateTime(value.naive_local())
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

impl From<()> for Literal {
    fn from(_: ()) -> Self {
        Literal::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{AnsiConnection, MySqlConnection};
    use serde_json::json;

    fn render(l: impl Into<Literal>) -> String {
        l.into().to_sql(&AnsiConnection)
    }

    #[test]
    fn scalars_render_bare() {
        assert_eq!(render(42), "42");
        assert_eq!(render(-7i64), "-7");
        assert_eq!(render(1.5), "1.5");
        assert_eq!(render(true), "1");
        assert_eq!(render(false), "0");
        assert_eq!(render(None::<i32>), "NULL");
        assert_eq!(render(()), "NULL");
    }

    #[test]
    fn strings_are_quoted_by_connection() {
        assert_eq!(render("foo"), "'foo'");
        assert_eq!(render("o'neil"), "'o''neil'");
        assert_eq!(
            Literal::from("o'neil").to_sql(&MySqlConnection),
            "'o\\'neil'"
        );
    }

    #[test]
    fn datetimes_render_quoted() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        assert_eq!(render(dt), "'2024-03-09 07:05:00'");
        assert_eq!(
            render(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()),
            "'2024-03-09 00:00:00'"
        );
        assert_eq!(render(dt.and_utc()), "'2024-03-09 07:05:00'");
    }

    #[test]
    fn non_finite_float_is_rejected() {
        assert!(Literal::from(f64::NAN).validate().unwrap_err().is_invalid_argument());
        assert!(Literal::from(f64::INFINITY).validate().is_err());
        assert!(Literal::from(2.5).validate().is_ok());
    }

    #[test]
    fn json_scalars_convert() {
        assert_eq!(Literal::try_from(&json!(null)).unwrap(), Literal::Null);
        assert_eq!(Literal::try_from(&json!(3)).unwrap(), Literal::Int(3));
        assert_eq!(Literal::try_from(&json!(0.25)).unwrap(), Literal::Float(0.25));
        assert_eq!(
            Literal::try_from(&json!("x")).unwrap(),
            Literal::Str("x".to_string())
        );
    }

    #[test]
    fn large_unsigned_integers_stay_exact() {
        let max = Literal::try_from(&json!(u64::MAX)).unwrap();
        assert_eq!(max, Literal::UInt(u64::MAX));
        assert_eq!(max.to_sql(&AnsiConnection), "18446744073709551615");
        assert_eq!(Literal::from(7u64), Literal::Int(7));
        assert_eq!(render(u64::MAX), "18446744073709551615");
        assert_eq!(render(12usize), "12");
    }

    #[test]
    fn json_containers_are_type_errors() {
        assert!(Literal::try_from(&json!([1])).unwrap_err().is_type_error());
        assert!(Literal::try_from(&json!({"a": 1})).unwrap_err().is_type_error());
    }

    #[test]
    fn json_list_requires_array() {
        let list = Literal::list_from_json(&json!([null, 43, 44])).unwrap();
        assert_eq!(list, vec![Literal::Null, Literal::Int(43), Literal::Int(44)]);
        assert!(Literal::list_from_json(&json!("x")).unwrap_err().is_type_error());
    }
}
