//! The processing-engine handle.
//!
//! A [`Session`] is built once per process and borrowed by every operation that reads or writes
//! tables or runs queries. It owns the warehouse location and a catalog of temporary views.

pub mod config;
pub mod error;

pub use crate::query::executor::result::QueryResult;

use crate::catalog::Catalog;
use crate::query;
use crate::session::config::SessionConfig;
use crate::session::error::SessionError;
use crate::storage::batch::RecordBatch;
use crate::table::error::WriteError;
use crate::table::options::WriteOptions;
use crate::table::snapshot::TableSnapshot;
use crate::table::writer::{CommitSummary, TableWriter};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct Session {
    config: SessionConfig,
    catalog: Catalog,
}

impl Session {
    /// Creates a new `Session` with an empty view catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use ingestor::session::Session;
    /// use ingestor::session::config::SessionConfig;
    ///
    /// let session = Session::new(SessionConfig::default().with_warehouse("/tmp/warehouse"));
    /// assert_eq!("ingestor", session.config().app_name);
    /// ```
    pub fn new(config: SessionConfig) -> Session {
        info!(
            app = %config.app_name,
            warehouse = %config.warehouse.display(),
            "session started"
        );
        Self {
            config,
            catalog: Catalog::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Location of `table_name` in `db_name`: `<warehouse>/<db_name>/<table_name>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ingestor::session::Session;
    /// use ingestor::session::config::SessionConfig;
    /// use std::path::PathBuf;
    ///
    /// let session = Session::new(SessionConfig::default().with_warehouse("/tmp/warehouse"));
    /// assert_eq!(
    ///     PathBuf::from("/tmp/warehouse/hudidb/events"),
    ///     session.table_path("hudidb", "events")
    /// );
    /// ```
    pub fn table_path(&self, db_name: &str, table_name: &str) -> PathBuf {
        self.config.warehouse.join(db_name).join(table_name)
    }

    /// Appends `batch` to the table at `table_path` as one commit.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] when the options are invalid, the batch does not fit the table,
    /// a precommit validator rejects the commit, or the files cannot be written. The table is
    /// left as it was unless the commit completed.
    pub fn write(
        &self,
        table_path: &Path,
        batch: &RecordBatch,
        options: &WriteOptions,
    ) -> Result<CommitSummary, WriteError> {
        TableWriter::new(table_path).write(batch, options)
    }

    /// Loads the latest snapshot of the table at `table_path`, metadata columns included.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Table`] when no table exists at `table_path` or its files cannot
    /// be read.
    pub fn read(&self, table_path: &Path) -> Result<RecordBatch, SessionError> {
        Ok(TableSnapshot::load(table_path)?.to_batch()?)
    }

    /// Registers `batch` as a view queryable by [`Session::sql`], replacing any view with the
    /// same name.
    pub fn create_or_replace_temp_view(&self, name: &str, batch: &RecordBatch) {
        self.catalog
            .create_or_replace(name, batch.schema().clone(), batch.rows().to_vec());
    }

    /// Executes a statement against the registered views.
    ///
    /// # Examples
    ///
    /// ```
    /// use ingestor::session::Session;
    /// use ingestor::session::config::SessionConfig;
    /// use ingestor::storage::batch::RecordBatch;
    /// use ingestor::types::column_type::ColumnType;
    /// use ingestor::{rows, schema};
    ///
    /// let session = Session::new(SessionConfig::default());
    /// let schema = schema!["uuid" => ColumnType::Int, "message" => ColumnType::Text].unwrap();
    /// let batch = RecordBatch::try_new(schema, rows![[1, "A"], [2, "B"]]).unwrap();
    /// session.create_or_replace_temp_view("events", &batch);
    ///
    /// let query_result = session.sql("select * from events where uuid > 1").unwrap();
    /// let result_set = query_result.result_set().unwrap();
    /// assert_eq!(1, result_set.iterator().unwrap().count());
    /// ```
    pub fn sql(&self, query: &str) -> Result<QueryResult, SessionError> {
        Ok(query::run(&self.catalog, query)?)
    }
}
