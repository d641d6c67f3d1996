use crate::catalog::table::Table;
use crate::catalog::table_scan::TableScan;
use crate::query::executor::error::ExecutionError;
use crate::query::executor::result_set::{ResultSet, RowViewResult};
use crate::query::executor::scan_result_set::ScanResultSet;
use crate::schema::Schema;
use crate::storage::row::Row;
use crate::storage::table_store::TableStore;
use crate::types::column_type::ColumnType;
use std::sync::Arc;

pub(crate) fn scan_of(schema: Schema, rows: Vec<Row>) -> Box<dyn ResultSet> {
    let store = TableStore::new();
    store.insert_all(rows);
    Box::new(ScanResultSet::new(
        TableScan::new(Arc::new(store)),
        Arc::new(Table::new("snapshots", schema)),
    ))
}

/// Yields a single failing row.
pub(crate) fn error_result_set() -> Box<dyn ResultSet> {
    Box::new(ErrorResultSet {
        schema: uuid_schema(),
    })
}

/// Fails to create an iterator at all.
pub(crate) fn init_error_result_set() -> Box<dyn ResultSet> {
    Box::new(InitErrorResultSet {
        schema: uuid_schema(),
    })
}

fn uuid_schema() -> Schema {
    Schema::new().add_column("uuid", ColumnType::Int).unwrap()
}

struct ErrorResultSet {
    schema: Schema,
}

impl ResultSet for ErrorResultSet {
    fn iterator(&self) -> Result<Box<dyn Iterator<Item = RowViewResult<'_>> + '_>, ExecutionError> {
        Ok(Box::new(std::iter::once(Err(
            ExecutionError::TypeMismatchInComparison,
        ))))
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}

struct InitErrorResultSet {
    schema: Schema,
}

impl ResultSet for InitErrorResultSet {
    fn iterator(&self) -> Result<Box<dyn Iterator<Item = RowViewResult<'_>> + '_>, ExecutionError> {
        Err(ExecutionError::TypeMismatchInComparison)
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}
