use crate::catalog::table::Table;
use crate::types::column_type::ColumnType;
use std::sync::Arc;

/// Describes a view registered in the catalog: its name and columns.
pub struct TableDescriptor {
    table: Arc<Table>,
}

impl TableDescriptor {
    pub(crate) fn new(table: Arc<Table>) -> TableDescriptor {
        Self { table }
    }

    pub fn name(&self) -> &str {
        self.table.name()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.table.schema().column_names()
    }

    /// Column names paired with their types and nullability.
    pub fn columns(&self) -> Vec<(&str, ColumnType, bool)> {
        self.table
            .schema()
            .columns()
            .iter()
            .map(|column| (column.name(), column.column_type(), column.is_nullable()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use crate::schema::Schema;

    #[test]
    fn table_name() {
        let table = Table::new("events", schema!["id" => ColumnType::Int].unwrap());
        let table_descriptor = TableDescriptor::new(Arc::new(table));

        assert_eq!("events", table_descriptor.name());
    }

    #[test]
    fn columns() {
        let table = Table::new(
            "events",
            Schema::new()
                .add_non_nullable_column("id", ColumnType::Int)
                .unwrap()
                .add_column("message", ColumnType::Text)
                .unwrap(),
        );
        let table_descriptor = TableDescriptor::new(Arc::new(table));

        assert_eq!(vec!["id", "message"], table_descriptor.column_names());
        assert_eq!(
            vec![("id", ColumnType::Int, false), ("message", ColumnType::Text, true)],
            table_descriptor.columns()
        );
    }
}
