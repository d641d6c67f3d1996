use crate::types::column_type::ColumnType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    nullable: bool,
}

impl Column {
    pub(crate) fn new(name: &str, column_type: ColumnType, nullable: bool) -> Column {
        Column {
            name: name.to_string(),
            column_type,
            nullable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub(crate) fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
