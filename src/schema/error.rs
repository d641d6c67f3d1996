use crate::types::column_type::ColumnType;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum SchemaError {
    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),
    #[error("column count mismatch: expected {expected}, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },
    #[error("column type mismatch for '{column}': expected {expected}, got {actual}")]
    ColumnTypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },
    #[error("column '{0}' is not nullable")]
    NullInNonNullableColumn(String),
}
