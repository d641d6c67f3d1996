use crate::catalog::table::Table;
use crate::catalog::table_scan::TableScan;
use crate::storage::row::Row;
use crate::storage::table_store::{RowId, TableStore};
use std::sync::Arc;

pub(crate) struct TableEntry {
    table: Arc<Table>,
    store: Arc<TableStore>,
}

impl TableEntry {
    pub(crate) fn new(table: Table) -> Arc<TableEntry> {
        Arc::new(Self {
            table: Arc::new(table),
            store: Arc::new(TableStore::new()),
        })
    }

    pub(crate) fn insert_all(&self, rows: Vec<Row>) -> Vec<RowId> {
        self.store.insert_all(rows)
    }

    pub(crate) fn scan(&self) -> TableScan {
        TableScan::new(self.store.clone())
    }

    pub(crate) fn table(&self) -> Arc<Table> {
        self.table.clone()
    }

    pub(crate) fn table_name(&self) -> &str {
        self.table.name()
    }
}

#[cfg(test)]
impl TableEntry {
    pub(crate) fn row_count(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn get(&self, row_id: RowId) -> Option<Row> {
        self.store.get(row_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::column_type::ColumnType;
    use crate::{row, rows, schema};

    #[test]
    fn insert_rows() {
        let table_entry = TableEntry::new(Table::new(
            "events",
            schema!["id" => ColumnType::Int, "message" => ColumnType::Text].unwrap(),
        ));
        table_entry.insert_all(rows![[10, "ingestor"], [20, "query"]]);

        let rows = table_entry.scan().iter().collect::<Vec<_>>();

        assert_eq!(rows![[10, "ingestor"], [20, "query"]], rows);
        assert_eq!(2, table_entry.row_count());
    }

    #[test]
    fn insert_row_and_get_by_row_id() {
        let table_entry = TableEntry::new(Table::new(
            "events",
            schema!["id" => ColumnType::Int].unwrap(),
        ));
        let row_ids = table_entry.insert_all(vec![row![100]]);

        assert_eq!(row![100], table_entry.get(row_ids[0]).unwrap());
        assert!(table_entry.get(1000).is_none());
    }
}
