use crate::catalog::table_descriptor::TableDescriptor;
use crate::query::executor::result_set::ResultSet;

/// The outcome of running one statement.
pub enum QueryResult {
    /// `SHOW TABLES`
    TableList(Vec<String>),
    /// `DESCRIBE TABLE`
    TableDescription(TableDescriptor),
    /// `SELECT`
    ResultSet(Box<dyn ResultSet>),
}

impl QueryResult {
    pub fn all_tables(&self) -> Option<&Vec<String>> {
        match self {
            QueryResult::TableList(tables) => Some(tables),
            _ => None,
        }
    }

    pub fn table_descriptor(&self) -> Option<&TableDescriptor> {
        match self {
            QueryResult::TableDescription(table_descriptor) => Some(table_descriptor),
            _ => None,
        }
    }

    pub fn result_set(&self) -> Option<&dyn ResultSet> {
        match self {
            QueryResult::ResultSet(result_set) => Some(result_set.as_ref()),
            _ => None,
        }
    }
}
