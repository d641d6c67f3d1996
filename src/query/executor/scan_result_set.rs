use crate::catalog::table::Table;
use crate::catalog::table_scan::TableScan;
use crate::query::executor::error::ExecutionError;
use crate::query::executor::result_set::{ResultSet, RowViewResult};
use crate::schema::Schema;
use crate::storage::row_view::RowView;
use std::sync::Arc;

/// Every row of a view, in insertion order.
pub struct ScanResultSet {
    table_scan: TableScan,
    table: Arc<Table>,
    visible_positions: Vec<usize>,
}

impl ScanResultSet {
    pub(crate) fn new(table_scan: TableScan, table: Arc<Table>) -> Self {
        let visible_positions = (0..table.schema().column_count()).collect();
        Self {
            table_scan,
            table,
            visible_positions,
        }
    }
}

impl ResultSet for ScanResultSet {
    fn iterator(&self) -> Result<Box<dyn Iterator<Item = RowViewResult<'_>> + '_>, ExecutionError> {
        Ok(Box::new(self.table_scan.iter().map(move |row| {
            Ok(RowView::new(
                row,
                self.table.schema(),
                &self.visible_positions,
            ))
        })))
    }

    fn schema(&self) -> &Schema {
        self.table.schema()
    }
}
