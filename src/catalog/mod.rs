use crate::catalog::error::CatalogError;
use crate::catalog::table::Table;
use crate::catalog::table_descriptor::TableDescriptor;
use crate::catalog::table_entry::TableEntry;
use crate::catalog::table_scan::TableScan;
use crate::schema::Schema;
use crate::storage::row::Row;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub mod error;
pub(crate) mod table;
pub mod table_descriptor;
pub(crate) mod table_entry;
pub mod table_scan;

/// Registry of queryable views, keyed by case-insensitive name.
pub struct Catalog {
    tables: RwLock<HashMap<String, Arc<TableEntry>>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Catalog {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `rows` under `name`, replacing any view already registered with that name.
    pub(crate) fn create_or_replace(&self, name: &str, schema: Schema, rows: Vec<Row>) {
        let table_entry = TableEntry::new(Table::new(name, schema));
        table_entry.insert_all(rows);

        let mut tables = self.tables.write().unwrap();
        tables.insert(Self::key(name), table_entry);
    }

    pub(crate) fn scan(&self, table_name: &str) -> Result<(TableScan, Arc<Table>), CatalogError> {
        let table_entry = self.table_entry_or_error(table_name)?;
        Ok((table_entry.scan(), table_entry.table()))
    }

    pub(crate) fn describe_table(&self, table_name: &str) -> Result<TableDescriptor, CatalogError> {
        let table_entry = self.table_entry_or_error(table_name)?;
        Ok(TableDescriptor::new(table_entry.table()))
    }

    /// Names of all registered views, sorted.
    pub(crate) fn show_tables(&self) -> Vec<String> {
        let tables = self.tables.read().unwrap();
        let mut names: Vec<String> = tables
            .values()
            .map(|entry| entry.table_name().to_string())
            .collect();
        names.sort();
        names
    }

    fn table_entry_or_error(&self, table_name: &str) -> Result<Arc<TableEntry>, CatalogError> {
        self.table_entry(table_name)
            .ok_or_else(|| CatalogError::TableDoesNotExist(table_name.to_string()))
    }

    fn table_entry(&self, name: &str) -> Option<Arc<TableEntry>> {
        let guard = self.tables.read().unwrap();
        guard.get(&Self::key(name)).cloned()
    }

    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }
}

#[cfg(test)]
impl Catalog {
    pub(crate) fn create_table(&self, name: &str, schema: Schema) -> Result<(), CatalogError> {
        let mut tables = self.tables.write().unwrap();

        let key = Self::key(name);
        if tables.contains_key(&key) {
            return Err(CatalogError::TableAlreadyExists(name.to_string()));
        }

        tables.insert(key, TableEntry::new(Table::new(name, schema)));
        Ok(())
    }

    pub(crate) fn insert_all_into(
        &self,
        table_name: &str,
        rows: Vec<Row>,
    ) -> Result<Vec<crate::storage::table_store::RowId>, CatalogError> {
        let table_entry = self.table_entry_or_error(table_name)?;
        Ok(table_entry.insert_all(rows))
    }

    pub(crate) fn get(
        &self,
        table_name: &str,
        row_id: crate::storage::table_store::RowId,
    ) -> Result<Option<Row>, CatalogError> {
        let table_entry = self.table_entry_or_error(table_name)?;
        Ok(table_entry.get(row_id))
    }
}
