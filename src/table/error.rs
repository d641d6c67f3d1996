use crate::query::QueryError;
use crate::schema::error::SchemaError;
use crate::storage::error::BatchError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a table's files.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table not found at {0}")]
    TableNotFound(PathBuf),
    #[error("i/o failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid instant '{0}'")]
    InvalidInstant(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Batch(#[from] BatchError),
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        TableError::Json {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while turning [`WriteOptions`](crate::table::options::WriteOptions) into a
/// typed configuration.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required option '{0}'")]
    MissingOption(String),
    #[error("invalid value '{value}' for option '{key}'")]
    InvalidValue { key: String, value: String },
    #[error("unknown precommit validator '{0}'")]
    UnknownValidator(String),
}

/// A precommit validator rejected the commit.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("query '{query}' returned {before} before the commit and {after} after it")]
    EqualityMismatch {
        query: String,
        before: String,
        after: String,
    },
    #[error("query '{query}' returned {result} both before and after the commit")]
    InequalityMismatch { query: String, result: String },
    #[error("query '{query}' returned {actual}, expected {expected}")]
    SingleResultMismatch {
        query: String,
        expected: String,
        actual: String,
    },
    #[error("query '{query}' returned {result}, expected a single value")]
    NotASingleValue { query: String, result: String },
    #[error("query '{query}' is not a row-returning select")]
    NotASelect { query: String },
    #[error("query '{query}' failed: {source}")]
    Query {
        query: String,
        #[source]
        source: QueryError,
    },
}

/// A write was rejected before or while committing. Nothing is visible to readers unless the
/// commit completed.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("batch schema does not match the schema of table '{0}'")]
    SchemaMismatch(String),
    #[error("record key field '{actual}' does not match the table's record key field '{expected}'")]
    RecordKeyMismatch { expected: String, actual: String },
    #[error("table type {actual} does not match the table's type {expected}")]
    TableTypeMismatch { expected: String, actual: String },
    #[error("precombine field {actual:?} does not match the table's precombine field {expected:?}")]
    PrecombineFieldMismatch {
        expected: Option<String>,
        actual: Option<String>,
    },
    #[error("partition field {actual:?} does not match the table's partition field {expected:?}")]
    PartitionFieldMismatch {
        expected: Option<String>,
        actual: Option<String>,
    },
    #[error("row {row} has partition value '{value}', which is not a valid partition path")]
    InvalidPartitionPath { row: usize, value: String },
    #[error("field '{0}' is not a column of the batch")]
    MissingField(String),
    #[error("row {row} has a null record key")]
    NullRecordKey { row: usize },
    #[error("row {row} has a null precombine value")]
    NullPrecombine { row: usize },
    #[error("precommit validation failed: {0}")]
    Validation(#[from] ValidationError),
}
