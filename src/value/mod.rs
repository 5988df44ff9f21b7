use std::fmt::{self, Display, Formatter};

mod runtime_error;
pub use runtime_error::RuntimeError;

mod record;
pub use record::Record;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// A runtime value. Always copied, never shared.
#[derive(Debug, Clone)]
pub enum Value {
    /// `integer` only decides how the number is rendered and serialized.
    Number { value: f64, integer: bool },
    String(String),
    Boolean(bool),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            // `+ 0.0` turns a negative zero into zero
            Self::Number {
                value,
                integer: true,
            } if value.is_finite() => write!(f, "{:.0}", value + 0.0),
            Self::Number { value, .. } if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{:.1}", value)
            }
            Self::Number { value, .. } => write!(f, "{}", value),
            Self::String(s) => write!(f, "{}", s),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Values of different types are never equal; numbers ignore the integer flag.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number { value: a, .. }, Self::Number { value: b, .. }) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl Value {
    pub fn integer(n: i64) -> Self {
        Self::Number {
            value: n as f64,
            integer: true,
        }
    }

    pub fn float(value: f64) -> Self {
        Self::Number {
            value,
            integer: false,
        }
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Self::Number { integer, .. } => *integer,
            _ => false,
        }
    }

    pub fn truth_value(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Number { value, .. } => *value != 0.0,
            Self::String(s) => !s.is_empty(),
        }
    }

    /// The numeric reading used by arithmetic and comparisons.
    pub fn number(&self) -> f64 {
        match self.to_num() {
            Self::Number { value, .. } => value,
            _ => 0.0,
        }
    }

    pub fn to_num(&self) -> Value {
        match self {
            Self::Number { .. } => self.clone(),
            Self::Boolean(b) => Self::integer(*b as i64),
            Self::String(s) => parse_number(s),
        }
    }

    /// Like `to_num`, truncated toward zero.
    pub fn to_int(&self) -> Value {
        match self.to_num() {
            Self::Number { value, .. } => Self::Number {
                value: value.trunc(),
                integer: true,
            },
            other => other,
        }
    }

    pub fn to_bool(&self) -> Value {
        Self::Boolean(self.truth_value())
    }

    pub fn to_str(&self) -> Value {
        match self {
            Self::String(_) => self.clone(),
            other => Self::String(other.to_string()),
        }
    }
}

fn parse_number(text: &str) -> Value {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Value::integer(n);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::float(n),
        _ => Value::integer(0),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let cases = vec![
            (Value::integer(42), "42"),
            (Value::integer(-7), "-7"),
            (Value::integer(0).to_num(), "0"),
            (
                Value::Number {
                    value: -0.0,
                    integer: true,
                },
                "0",
            ),
            (Value::float(2.5), "2.5"),
            (Value::float(3.0), "3.0"),
            (Value::from("hi"), "hi"),
            (Value::from(true), "true"),
            (Value::from(false), "false"),
        ];

        for (value, expected) in cases.into_iter() {
            assert_eq!(value.to_string(), expected);
        }
    }

    #[test]
    fn test_to_num() {
        let cases = vec![
            (Value::from("12"), 12.0, true),
            (Value::from("  8 "), 8.0, true),
            (Value::from("2.5"), 2.5, false),
            (Value::from("abc"), 0.0, true),
            (Value::from(""), 0.0, true),
            (Value::from("inf"), 0.0, true),
            (Value::from(true), 1.0, true),
            (Value::from(false), 0.0, true),
            (Value::float(1.5), 1.5, false),
        ];

        for (value, expected, integer) in cases.into_iter() {
            match value.to_num() {
                Value::Number {
                    value: n,
                    integer: flag,
                } => {
                    assert_eq!(n, expected, "{:?}", value);
                    assert_eq!(flag, integer, "{:?}", value);
                }
                other => panic!("expected number, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_to_int() {
        let cases = vec![
            (Value::float(2.9), "2"),
            (Value::float(-2.9), "-2"),
            (Value::from("7.5"), "7"),
            (Value::from(true), "1"),
        ];

        for (value, expected) in cases.into_iter() {
            let converted = value.to_int();
            assert!(converted.is_integer());
            assert_eq!(converted.to_string(), expected);
        }
    }

    #[test]
    fn test_truth_value() {
        let cases = vec![
            (Value::from(true), true),
            (Value::from(false), false),
            (Value::integer(0), false),
            (Value::integer(-1), true),
            (Value::float(0.5), true),
            (Value::from(""), false),
            (Value::from("false"), true),
        ];

        for (value, expected) in cases.into_iter() {
            assert_eq!(value.truth_value(), expected, "{:?}", value);
        }
    }

    #[test]
    fn test_equality_is_type_matched() {
        assert_eq!(Value::integer(3), Value::float(3.0));
        assert_ne!(Value::integer(1), Value::from(true));
        assert_ne!(Value::integer(1), Value::from("1"));
        assert_eq!(Value::from("a"), Value::from("a"));
    }
}
