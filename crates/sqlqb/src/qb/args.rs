//! Mixed-shape arguments.
//!
//! Several builder methods accept a bare name, a list of names, or a list of
//! `(key, value)` pairs. [`Arg`] normalises those shapes once, at the top of
//! each mutator.

use crate::error::{QbError, QbResult};
use crate::literal::json_type_name;
use serde_json::Value;

/// A single name, a list of names, or an ordered mapping.
///
/// What the pair values mean depends on the call: an alias→column mapping for
/// `select`, alias→table for `from`, column→direction for `order_by`.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<V> {
    Single(String),
    Many(Vec<String>),
    Pairs(Vec<(String, V)>),
}

impl<V> Arg<V> {
    pub fn is_empty(&self) -> bool {
        match self {
            Arg::Single(_) => false,
            Arg::Many(names) => names.is_empty(),
            Arg::Pairs(pairs) => pairs.is_empty(),
        }
    }
}

impl<V> From<&str> for Arg<V> {
    fn from(value: &str) -> Self {
        Arg::Single(value.to_string())
    }
}

impl<V> From<String> for Arg<V> {
    fn from(value: String) -> Self {
        Arg::Single(value)
    }
}

impl<V> From<&String> for Arg<V> {
    fn from(value: &String) -> Self {
        Arg::Single(value.clone())
    }
}

impl<V> From<Vec<&str>> for Arg<V> {
    fn from(value: Vec<&str>) -> Self {
        Arg::Many(value.into_iter().map(str::to_string).collect())
    }
}

impl<V> From<Vec<String>> for Arg<V> {
    fn from(value: Vec<String>) -> Self {
        Arg::Many(value)
    }
}

impl<V> From<&[&str]> for Arg<V> {
    fn from(value: &[&str]) -> Self {
        Arg::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<V, const N: usize> From<[&str; N]> for Arg<V> {
    fn from(value: [&str; N]) -> Self {
        Arg::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<V, K, T> From<Vec<(K, T)>> for Arg<V>
where
    K: Into<String>,
    T: Into<V>,
{
    fn from(value: Vec<(K, T)>) -> Self {
        Arg::Pairs(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<V, K, T, const N: usize> From<[(K, T); N]> for Arg<V>
where
    K: Into<String>,
    T: Into<V>,
{
    fn from(value: [(K, T); N]) -> Self {
        Arg::Pairs(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Names from request payloads: a string, an array of strings, or an object
/// of strings.
impl TryFrom<&Value> for Arg<String> {
    type Error = QbError;

    fn try_from(value: &Value) -> QbResult<Self> {
        match value {
            Value::String(s) => Ok(Arg::Single(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(QbError::type_error("string", json_type_name(other))),
                })
                .collect::<QbResult<Vec<_>>>()
                .map(Arg::Many),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| match v {
                    Value::String(s) => Ok((k.clone(), s.clone())),
                    other => Err(QbError::type_error("string", json_type_name(other))),
                })
                .collect::<QbResult<Vec<_>>>()
                .map(Arg::Pairs),
            other => Err(QbError::type_error(
                "string, array or object",
                json_type_name(other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shapes_from_rust_values() {
        assert_eq!(Arg::<String>::from("a"), Arg::Single("a".into()));
        assert_eq!(
            Arg::<String>::from(["a", "b"]),
            Arg::Many(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            Arg::<String>::from([("x", "a")]),
            Arg::Pairs(vec![("x".into(), "a".into())])
        );
        assert!(Arg::<String>::from(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn shapes_from_json() {
        assert_eq!(
            Arg::<String>::try_from(&json!("a")).unwrap(),
            Arg::Single("a".to_string())
        );
        assert_eq!(
            Arg::<String>::try_from(&json!(["a", "b"])).unwrap(),
            Arg::Many(vec!["a".to_string(), "b".to_string()])
        );
        let pairs = Arg::<String>::try_from(&json!({"x": "a"})).unwrap();
        assert_eq!(pairs, Arg::Pairs(vec![("x".to_string(), "a".to_string())]));
    }

    #[test]
    fn json_type_errors() {
        assert!(Arg::<String>::try_from(&json!(1)).unwrap_err().is_type_error());
        assert!(Arg::<String>::try_from(&json!(null)).unwrap_err().is_type_error());
        assert!(Arg::<String>::try_from(&json!(["a", 2])).unwrap_err().is_type_error());
        assert!(Arg::<String>::try_from(&json!({"x": true})).unwrap_err().is_type_error());
    }
}
