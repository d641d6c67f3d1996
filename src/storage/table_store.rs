use crate::storage::row::Row;
use crossbeam_skiplist::SkipMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::AcqRel;

pub type RowId = u64;

/// Row storage backing a view. Rows are kept in insertion order, keyed by a monotonically
/// increasing `RowId`.
pub(crate) struct TableStore {
    entries: SkipMap<RowId, Row>,
    current_row_id: AtomicU64,
}

impl TableStore {
    pub(crate) fn new() -> TableStore {
        Self {
            entries: SkipMap::new(),
            current_row_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn insert_all(&self, rows: Vec<Row>) -> Vec<RowId> {
        rows.into_iter().map(|row| self.insert(row)).collect()
    }

    pub(crate) fn insert(&self, row: Row) -> RowId {
        let row_id = self.current_row_id.fetch_add(1, AcqRel);
        self.entries.insert(row_id, row);
        row_id
    }

    pub(crate) fn iter(&self) -> TableStoreIterator<'_> {
        TableStoreIterator {
            inner: self.entries.iter(),
        }
    }
}

pub(crate) struct TableStoreIterator<'a> {
    inner: crossbeam_skiplist::map::Iter<'a, RowId, Row>,
}

impl Iterator for TableStoreIterator<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
impl TableStore {
    pub(crate) fn get(&self, row_id: RowId) -> Option<Row> {
        self.entries.get(&row_id).map(|entry| entry.value().clone())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{row, rows};

    #[test]
    fn insert_row_and_get_row_id() {
        let store = TableStore::new();
        let row_id = store.insert(row![10, "ingestor"]);

        assert_eq!(1, row_id);
    }

    #[test]
    fn insert_rows_and_scan_in_insertion_order() {
        let store = TableStore::new();
        store.insert_all(rows![[10, "ingestor"], [20, "query"]]);

        let rows: Vec<Row> = store.iter().collect();

        assert_eq!(rows![[10, "ingestor"], [20, "query"]], rows);
        assert_eq!(2, store.len());
    }

    #[test]
    fn insert_row_and_get_by_row_id() {
        let store = TableStore::new();
        let row_id = store.insert(row![10, "ingestor"]);

        assert_eq!(row![10, "ingestor"], store.get(row_id).unwrap());
    }

    #[test]
    fn insert_row_and_attempt_to_get_by_non_existent_row_id() {
        let store = TableStore::new();
        store.insert(row![10, "ingestor"]);

        assert!(store.get(1000).is_none());
    }
}
