//! ORDER BY keys and LIMIT/OFFSET.

use super::args::Arg;
use crate::error::{QbError, QbResult};
use crate::ident::Ident;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = QbError;

    fn from_str(s: &str) -> QbResult<Self> {
        if s.eq_ignore_ascii_case("ASC") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(Direction::Desc)
        } else {
            Err(QbError::InvalidDirection(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OrderExpr {
    Column(Ident),
    Raw(String),
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey {
    expression: OrderExpr,
    direction: Direction,
}

impl OrderKey {
    pub fn column(column: &str, direction: Direction) -> QbResult<Self> {
        Ok(Self {
            expression: OrderExpr::Column(Ident::parse(column)?),
            direction,
        })
    }

    pub fn raw(expression: &str, direction: Direction) -> QbResult<Self> {
        if expression.trim().is_empty() {
            return Err(QbError::invalid_argument("Raw order expression cannot be empty"));
        }
        Ok(Self {
            expression: OrderExpr::Raw(expression.to_string()),
            direction,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn write_sql(&self, out: &mut String) {
        match &self.expression {
            OrderExpr::Column(ident) => ident.write_sql(out),
            OrderExpr::Raw(expr) => out.push_str(expr),
        }
        out.push(' ');
        out.push_str(self.direction.as_str());
    }
}

/// Sort keys in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ordering {
    keys: Vec<OrderKey>,
}

impl Ordering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[OrderKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parse an `order_by`/`raw_order_by` argument. Pairs are key→direction
    /// and override `direction` per key.
    pub(crate) fn parse(
        columns: Arg<String>,
        direction: Option<&str>,
        raw: bool,
    ) -> QbResult<Vec<OrderKey>> {
        let default = match direction {
            Some(d) => d.parse()?,
            None => Direction::Asc,
        };
        let key = |expr: &str, dir: Direction| {
            if raw {
                OrderKey::raw(expr, dir)
            } else {
                OrderKey::column(expr, dir)
            }
        };
        match columns {
            Arg::Single(c) => Ok(vec![key(c.as_str(), default)?]),
            Arg::Many(cs) if cs.is_empty() => {
                Err(QbError::invalid_argument("Order column list cannot be empty"))
            }
            Arg::Many(cs) => cs.iter().map(|c| key(c.as_str(), default)).collect(),
            Arg::Pairs(ps) if ps.is_empty() => {
                Err(QbError::invalid_argument("Order mapping cannot be empty"))
            }
            Arg::Pairs(ps) => ps
                .iter()
                .map(|(c, d)| key(c.as_str(), d.parse()?))
                .collect(),
        }
    }

    pub(crate) fn extend(&mut self, keys: Vec<OrderKey>) {
        self.keys.extend(keys);
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            key.write_sql(out);
        }
    }
}

/// `LIMIT [offset,]count`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitSpec {
    count: u64,
    offset: Option<u64>,
}

impl LimitSpec {
    pub fn new(count: i64, offset: Option<i64>) -> QbResult<Self> {
        let count = u64::try_from(count).map_err(|_| {
            QbError::InvalidLimit(format!("count must not be negative, got {count}"))
        })?;
        let offset = offset
            .map(|o| {
                u64::try_from(o).map_err(|_| {
                    QbError::InvalidLimit(format!("offset must not be negative, got {o}"))
                })
            })
            .transpose()?;
        Ok(Self { count, offset })
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        match self.offset {
            Some(offset) => out.push_str(&format!("{offset},{}", self.count)),
            None => out.push_str(&self.count.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql(keys: Vec<OrderKey>) -> String {
        let mut o = Ordering::new();
        o.extend(keys);
        let mut out = String::new();
        o.write_sql(&mut out);
        out
    }

    #[test]
    fn direction_tokens() {
        assert_eq!("asc".parse::<Direction>().unwrap(), Direction::Asc);
        assert_eq!("DESC".parse::<Direction>().unwrap(), Direction::Desc);
        assert!("bad".parse::<Direction>().unwrap_err().is_invalid_direction());
        assert!("".parse::<Direction>().is_err());
        assert!(" asc".parse::<Direction>().is_err());
    }

    #[test]
    fn defaults_to_asc() {
        let keys = Ordering::parse(Arg::from(["a", "t.b"]), None, false).unwrap();
        assert_eq!(sql(keys), "`a` ASC,`t`.`b` ASC");
    }

    #[test]
    fn pairs_override_call_direction() {
        let keys =
            Ordering::parse(Arg::from([("a", "desc"), ("b", "asc")]), Some("desc"), false).unwrap();
        assert_eq!(sql(keys), "`a` DESC,`b` ASC");
    }

    #[test]
    fn one_bad_key_fails_whole_call() {
        let err = Ordering::parse(Arg::from([("bar", "asc"), ("baz", "bad")]), None, false)
            .unwrap_err();
        assert!(err.is_invalid_direction());
        let err = Ordering::parse(Arg::from(["ok", "not ok"]), None, false).unwrap_err();
        assert!(err.is_invalid_identifier());
        let err = Ordering::parse(Arg::from("a"), Some("up"), false).unwrap_err();
        assert!(err.is_invalid_direction());
    }

    #[test]
    fn raw_keys_are_verbatim() {
        let keys = Ordering::parse(Arg::from("FIELD(id, 3, 1, 2)"), Some("desc"), true).unwrap();
        assert_eq!(sql(keys), "FIELD(id, 3, 1, 2) DESC");
        assert!(Ordering::parse(Arg::from(""), None, true).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn limit_rules() {
        assert!(LimitSpec::new(-1, None).unwrap_err().is_invalid_limit());
        assert!(LimitSpec::new(10, Some(-1)).unwrap_err().is_invalid_limit());

        let mut out = String::new();
        LimitSpec::new(50, None).unwrap().write_sql(&mut out);
        assert_eq!(out, "50");

        let mut out = String::new();
        LimitSpec::new(50, Some(10)).unwrap().write_sql(&mut out);
        assert_eq!(out, "10,50");

        assert!(LimitSpec::new(0, Some(0)).is_ok());
    }
}
