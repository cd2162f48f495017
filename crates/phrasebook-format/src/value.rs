use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Error as FmtError, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Named values available to `{{name}}` template tags.
pub type NamedValues = HashMap<String, Value>;

/// A runtime value passed to a phrase as a count, a named value, or a
/// positional argument.
///
/// Values are loosely typed on purpose: translators write `%d` or `{{n}}`
/// without knowing whether the caller passed a number or a numeric string,
/// so every variant can be coerced with [`Value::to_integer`],
/// [`Value::to_float`] or its `Display` form.
///
/// # Example
///
/// ```
/// use phrasebook_format::Value;
///
/// let count: Value = 42.into();
/// assert_eq!(count.to_integer(), Some(42));
///
/// let text: Value = "7 apples".into();
/// assert_eq!(text.to_integer(), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean, used by template sections.
    Bool(bool),

    /// An integer number (used for plural selection).
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),

    /// A list of values, iterated by template sections.
    List(Vec<Value>),

    /// Nested named values, addressed with dotted template names.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a map of nested values, if it is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Coerce to an integer the way a lenient integer parse would.
    ///
    /// Floats are truncated toward zero. Strings yield their leading integer
    /// (`"12px"` is 12, `"px"` is `None`). Other variants have no integer form.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Value::String(s) => leading_integer(s),
            _ => None,
        }
    }

    /// Coerce to a float, reading the longest numeric prefix of strings.
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => leading_float(s),
            _ => None,
        }
    }

    /// Whether a template section should treat this value as present.
    ///
    /// `false`, zero, NaN and the empty string are falsy. Lists and maps are
    /// always truthy here; an empty list simply renders zero iterations.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) => true,
        }
    }
}

/// Parse the leading integer of a string, skipping leading whitespace.
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Parse the longest prefix of a string that is a valid float.
fn leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let candidate_end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')))
        .unwrap_or(trimmed.len());
    (1..=candidate_end)
        .rev()
        .filter(|&end| trimmed.is_char_boundary(end))
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) if n.is_nan() => write!(f, "NaN"),
            Value::Float(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
            }
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| FmtError)?;
                write!(f, "{json}")
            }
        }
    }
}

// From implementations for common types

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}
