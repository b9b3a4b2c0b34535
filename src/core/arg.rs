//! Loosely typed call arguments.
//!
//! The timestamp helpers accept whatever a caller hands them and report a
//! type mismatch when the runtime type is wrong, rather than relying on the
//! compiler. [`Arg`] is that runtime value: it is what a JSON request, a
//! config entry or a plain Rust literal becomes before validation.

use crate::time::Timestamp;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed argument.
///
/// # Examples
///
/// ```
/// use isostamp::Arg;
///
/// let s: Arg = "2025-01-20T13:00:00".into();
/// assert_eq!(s.type_name(), "string");
///
/// let missing: Arg = Option::<&str>::None.into();
/// assert!(missing.is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Arg {
    /// String value.
    String(String),

    /// Integer value (i64).
    Integer(i64),

    /// Floating point value (f64).
    Float(f64),

    /// Boolean value.
    Boolean(bool),

    /// List of values.
    List(Vec<Self>),

    /// Map of values.
    Map(BTreeMap<String, Self>),

    /// An already parsed timestamp.
    Timestamp(Timestamp),

    /// Absent value.
    #[default]
    Null,
}

impl Arg {
    /// Name of the runtime type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Timestamp(_) => "timestamp",
            Self::Null => "null",
        }
    }

    /// Returns true for [`Arg::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text of a string argument.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value of a numeric (integer or float) argument.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns true for `Null` and for the empty string: the two values the
    /// defaulting helpers replace with the current time.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for Arg {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Timestamp> for Arg {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<&Self> for Arg {
    fn from(arg: &Self) -> Self {
        arg.clone()
    }
}

#[allow(clippy::use_self)]
impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[allow(clippy::use_self)]
impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Arg {
    #[allow(clippy::option_if_let_else)]
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else {
                    n.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversions() {
        assert!(matches!(Arg::from("test"), Arg::String(_)));
        assert!(matches!(Arg::from(42i64), Arg::Integer(42)));
        assert!(matches!(Arg::from(42i32), Arg::Integer(42)));
        assert!(matches!(Arg::from(std::f64::consts::PI), Arg::Float(_)));
        assert!(matches!(Arg::from(true), Arg::Boolean(true)));
        assert!(Arg::from(Option::<String>::None).is_null());
        assert!(matches!(Arg::from(Some(7i64)), Arg::Integer(7)));
    }

    #[test]
    fn test_from_vec() {
        let arg: Arg = vec![1i64, 2, 3].into();
        if let Arg::List(list) = arg {
            assert_eq!(list.len(), 3);
            assert!(matches!(list[2], Arg::Integer(3)));
        } else {
            unreachable!("Expected List variant");
        }
    }

    #[test]
    fn test_from_json() {
        assert!(Arg::from(json!(null)).is_null());
        assert_eq!(Arg::from(json!(5)), Arg::Integer(5));
        assert_eq!(Arg::from(json!(2.5)), Arg::Float(2.5));
        assert_eq!(Arg::from(json!("x")), Arg::String("x".to_string()));
        assert_eq!(Arg::from(json!([1, "a"])).type_name(), "list");
        assert_eq!(Arg::from(json!({"a": 1})).type_name(), "map");
        assert_eq!(Arg::from(json!(u64::MAX)).type_name(), "float");
    }

    #[test]
    fn test_display() {
        assert_eq!(Arg::from(vec![1i64, 2]).to_string(), "[1, 2]");
        assert_eq!(Arg::from(json!({"a": 1, "b": "x"})).to_string(), "{a: 1, b: x}");
        assert_eq!(Arg::Null.to_string(), "null");
        assert_eq!(Arg::from(2.5_f64).to_string(), "2.5");
    }

    #[test]
    fn test_blank_and_accessors() {
        assert!(Arg::Null.is_blank());
        assert!(Arg::from("").is_blank());
        assert!(!Arg::from(" ").is_blank());
        assert!(!Arg::from(0i64).is_blank());
        assert_eq!(Arg::from("abc").as_str(), Some("abc"));
        assert_eq!(Arg::from(3i64).as_number(), Some(3.0));
        assert_eq!(Arg::from("3").as_number(), None);
    }

    #[test]
    fn test_serialize_untagged() {
        let arg = Arg::from(vec![Arg::from("a"), Arg::Null, Arg::from(1i64)]);
        assert_eq!(serde_json::to_string(&arg).unwrap(), r#"["a",null,1]"#);
        let ts: Timestamp = "2025-01-20T13:00:00".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&Arg::from(ts)).unwrap(),
            "\"2025-01-20T13:00:00\""
        );
    }
}
