use crate::schema::error::SchemaError;
use thiserror::Error;

/// Represents errors that can occur while building a record batch.
#[derive(Debug, PartialEq, Error)]
pub enum BatchError {
    /// A row at the given position does not fit the batch schema.
    #[error("row {row} does not match the batch schema: {source}")]
    IncompatibleRow { row: usize, source: SchemaError },
    /// The batch schema could not be extended.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Represents errors that can occur while building a row comparator.
#[derive(Debug, PartialEq, Error)]
pub enum RowViewComparatorError {
    #[error("unknown ordering column: {0}")]
    UnknownColumn(String),
}
