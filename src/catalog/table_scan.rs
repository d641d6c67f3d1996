use crate::storage::row::Row;
use crate::storage::table_store::{TableStore, TableStoreIterator};
use std::sync::Arc;

/// A handle to a table scan operation that owns the `TableStore`.
///
/// The handle keeps the store alive for the duration of the scan; the iterator itself is
/// created on demand via [`TableScan::iter`] and borrows from this handle.
pub struct TableScan {
    store: Arc<TableStore>,
}

impl TableScan {
    pub(crate) fn new(store: Arc<TableStore>) -> Self {
        Self { store }
    }

    /// Returns an iterator over the rows in the table, in insertion order.
    pub fn iter(&self) -> TableIterator<'_> {
        TableIterator {
            iter: self.store.iter(),
        }
    }
}

pub struct TableIterator<'a> {
    iter: TableStoreIterator<'a>,
}

impl Iterator for TableIterator<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
