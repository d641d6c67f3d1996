//! Snapshot reads rendered for the console.

use crate::display::{render_result_set, ShowOptions};
use crate::query::QueryError;
use crate::session::error::SessionError;
use crate::session::{QueryResult, Session};
use tracing::debug;

/// Name of the temporary view a table is registered under while it is read.
pub const SNAPSHOT_VIEW: &str = "snapshots";

const SELECT_ALL: &str = "select * from snapshots";

/// Loads a table's latest snapshot and selects every row of it.
pub struct TableReader<'a> {
    session: &'a Session,
}

impl<'a> TableReader<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Registers the snapshot of `table_name` as [`SNAPSHOT_VIEW`], replacing any previous
    /// registration, and runs `SELECT *` over it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Table`] when the table was never written.
    pub fn read(&self, db_name: &str, table_name: &str) -> Result<QueryResult, SessionError> {
        let table_path = self.session.table_path(db_name, table_name);
        let batch = self.session.read(&table_path)?;
        debug!(table = %table_name, rows = batch.row_count(), "registered snapshot view");

        self.session.create_or_replace_temp_view(SNAPSHOT_VIEW, &batch);
        self.session.sql(SELECT_ALL)
    }

    /// Renders every column of up to `show_rows` rows, cells untruncated.
    pub fn render(&self, db_name: &str, table_name: &str) -> Result<String, SessionError> {
        let query_result = self.read(db_name, table_name)?;
        let options = ShowOptions::untruncated(self.session.config().show_rows);

        match query_result.result_set() {
            Some(result_set) => Ok(render_result_set(result_set, options).map_err(QueryError::from)?),
            None => Ok(String::new()),
        }
    }
}
