use crate::storage::error::BatchError;
use crate::table::error::WriteError;
use thiserror::Error;

/// Errors the orchestrator cannot recover from by redirecting to the error table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Validation was requested without a query to validate with.
    #[error("validation requested for table '{0}' without a validator query")]
    MissingValidatorQuery(String),
    /// The error batch could not be derived from the failed batch.
    #[error("cannot derive error batch: {0}")]
    ErrorBatch(#[from] BatchError),
    /// The redirect itself failed. The failed batch is in neither table.
    #[error("write to error table '{error_table}' failed: {source}")]
    ErrorTableWrite {
        error_table: String,
        #[source]
        source: WriteError,
    },
}
