use crate::types::column_type::ColumnType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A single cell value.
///
/// Serialized without a tag, so data files hold plain JSON scalars (`1`, `"a"`, `null`).
#[derive(Debug, PartialEq, Hash, Eq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Int(i64),
    Text(String),
    Null,
}

impl ColumnValue {
    pub fn int(value: i64) -> ColumnValue {
        ColumnValue::Int(value)
    }

    pub fn text<T: Into<String>>(value: T) -> ColumnValue {
        ColumnValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// The type of the value, `None` for `Null`.
    pub(crate) fn column_type(&self) -> Option<ColumnType> {
        match self {
            ColumnValue::Int(_) => Some(ColumnType::Int),
            ColumnValue::Text(_) => Some(ColumnType::Text),
            ColumnValue::Null => None,
        }
    }

    /// Compares two values of the same type.
    ///
    /// `Null` sorts before every other value. Values of different types are not comparable.
    pub(crate) fn partial_compare(&self, other: &ColumnValue) -> Option<Ordering> {
        match (self, other) {
            (ColumnValue::Null, ColumnValue::Null) => Some(Ordering::Equal),
            (ColumnValue::Null, _) => Some(Ordering::Less),
            (_, ColumnValue::Null) => Some(Ordering::Greater),
            (ColumnValue::Int(left), ColumnValue::Int(right)) => Some(left.cmp(right)),
            (ColumnValue::Text(left), ColumnValue::Text(right)) => Some(left.cmp(right)),
            _ => None,
        }
    }
}

impl Display for ColumnValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnValue::Int(value) => write!(f, "{}", value),
            ColumnValue::Text(value) => write!(f, "{}", value),
            ColumnValue::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Int(value)
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        ColumnValue::Int(value as i64)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Text(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => ColumnValue::Null,
        }
    }
}
