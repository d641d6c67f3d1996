//! Batch ingestion with redirection of failed batches to a paired error table.

pub mod error;
pub mod request;

use crate::ingest::error::IngestError;
use crate::ingest::request::IngestRequest;
use crate::session::Session;
use crate::storage::batch::RecordBatch;
use crate::storage::error::BatchError;
use crate::table::error::WriteError;
use crate::table::writer::CommitSummary;
use tracing::warn;
use uuid::Uuid;

/// Column added to every row of a failed batch, holding a UUID v4 unique to that row.
pub const ERROR_ID_COLUMN: &str = "error_id";

/// How a batch ended up persisted.
#[derive(Debug)]
pub enum WriteOutcome {
    /// The batch was committed to the primary table.
    Committed(CommitSummary),
    /// The primary write failed and the whole batch was committed to the error table instead.
    Redirected {
        error_table: String,
        reason: WriteError,
        summary: CommitSummary,
    },
}

impl WriteOutcome {
    pub fn is_redirected(&self) -> bool {
        matches!(self, WriteOutcome::Redirected { .. })
    }

    pub fn summary(&self) -> &CommitSummary {
        match self {
            WriteOutcome::Committed(summary) => summary,
            WriteOutcome::Redirected { summary, .. } => summary,
        }
    }
}

/// Writes batches through a [`Session`], redirecting any failed batch to `error_<table>`.
///
/// Failure is batch-granular: when the primary write fails for any reason, every row of the
/// batch goes to the error table, including rows that would have been accepted on their own.
pub struct Ingestor<'a> {
    session: &'a Session,
}

impl<'a> Ingestor<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Appends `batch` to the table named by `request`, or to its error table when that fails.
    ///
    /// # Errors
    ///
    /// * [`IngestError::MissingValidatorQuery`] when validation is requested without a query.
    ///   Nothing is written.
    /// * [`IngestError::ErrorBatch`] when the batch already has an `error_id` column.
    /// * [`IngestError::ErrorTableWrite`] when the write to the error table fails too.
    pub fn write(
        &self,
        batch: &RecordBatch,
        request: &IngestRequest,
    ) -> Result<WriteOutcome, IngestError> {
        let options = request.write_options()?;
        let table_path = self
            .session
            .table_path(&request.db_name, &request.table_name);

        match self.session.write(&table_path, batch, &options) {
            Ok(summary) => Ok(WriteOutcome::Committed(summary)),
            Err(reason) => self.redirect(batch, request, reason),
        }
    }

    fn redirect(
        &self,
        batch: &RecordBatch,
        request: &IngestRequest,
        reason: WriteError,
    ) -> Result<WriteOutcome, IngestError> {
        let error_table = request.error_table_name();
        warn!(
            table = %request.table_name,
            error_table = %error_table,
            reason = %reason,
            "UPSERT items into error table {}",
            error_table
        );

        let error_batch = error_batch(batch)?;
        let error_table_path = self.session.table_path(&request.db_name, &error_table);
        let summary = self
            .session
            .write(&error_table_path, &error_batch, &request.error_table_options())
            .map_err(|source| IngestError::ErrorTableWrite {
                error_table: error_table.clone(),
                source,
            })?;

        Ok(WriteOutcome::Redirected {
            error_table,
            reason,
            summary,
        })
    }
}

/// Derives the batch written to an error table: every row of `batch` plus its own
/// [`ERROR_ID_COLUMN`].
pub fn error_batch(batch: &RecordBatch) -> Result<RecordBatch, BatchError> {
    batch.with_generated_column(ERROR_ID_COLUMN, || Uuid::new_v4().to_string())
}
