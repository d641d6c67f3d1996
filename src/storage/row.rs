use crate::types::column_value::ColumnValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: Vec<ColumnValue>,
}

impl Row {
    pub fn empty() -> Row {
        Self { values: Vec::new() }
    }

    pub fn filled(values: Vec<ColumnValue>) -> Row {
        Self { values }
    }

    pub fn add(mut self, value: ColumnValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn column_values(&self) -> &[ColumnValue] {
        &self.values
    }

    pub(crate) fn column_value_at(&self, index: usize) -> Option<&ColumnValue> {
        self.values.get(index)
    }

    /// Returns a new row holding `leading` followed by the values of this row.
    pub(crate) fn prepend(&self, leading: Vec<ColumnValue>) -> Row {
        let mut values = leading;
        values.extend(self.values.iter().cloned());
        Row::filled(values)
    }
}
