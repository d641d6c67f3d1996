use crate::types::column_value::ColumnValue;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Text,
}

impl ColumnType {
    /// Returns true if the value can be stored in a column of this type.
    ///
    /// `Null` is accepted by every type; nullability is a property of the column, not the type.
    pub(crate) fn accepts(&self, value: &ColumnValue) -> bool {
        matches!(
            (self, value),
            (ColumnType::Int, ColumnValue::Int(_))
                | (ColumnType::Text, ColumnValue::Text(_))
                | (_, ColumnValue::Null)
        )
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Int => write!(f, "int"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}
