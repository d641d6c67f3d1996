use crate::schema::Schema;
use crate::table::error::TableError;
use crate::table::file_layout::{read_json, write_json, FileLayout};
use crate::table::options::{TableType, WriteConfig};
use serde::{Deserialize, Serialize};

/// Persistent properties of a table, fixed by its first commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub table_type: TableType,
    pub record_key_field: String,
    pub precombine_field: Option<String>,
    pub partition_field: Option<String>,
    pub schema: Schema,
}

impl TableConfig {
    pub(crate) fn from_write_config(config: &WriteConfig, schema: &Schema) -> Self {
        Self {
            name: config.table_name.clone(),
            table_type: config.table_type,
            record_key_field: config.record_key_field.clone(),
            precombine_field: config.precombine_field.clone(),
            partition_field: config.partition_field.clone(),
            schema: schema.clone(),
        }
    }

    /// Loads the config, or `None` when the table has never been committed to.
    pub(crate) fn load(layout: &FileLayout) -> Result<Option<TableConfig>, TableError> {
        let path = layout.table_config_path();
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    pub(crate) fn store(&self, layout: &FileLayout) -> Result<(), TableError> {
        write_json(&layout.table_config_path(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use crate::table::options::{WriteOptions, PRECOMBINE_FIELD, RECORD_KEY_FIELD, TABLE_NAME};
    use crate::types::column_type::ColumnType;

    #[test]
    fn store_and_load() {
        let directory = tempfile::tempdir().unwrap();
        let layout = FileLayout::new(directory.path());
        let options = WriteOptions::new()
            .with(TABLE_NAME, "events")
            .with(RECORD_KEY_FIELD, "uuid")
            .with(PRECOMBINE_FIELD, "precomb");
        let write_config = WriteConfig::try_from(&options).unwrap();
        let schema = schema!["uuid" => ColumnType::Int, "precomb" => ColumnType::Int].unwrap();

        let config = TableConfig::from_write_config(&write_config, &schema);
        config.store(&layout).unwrap();

        assert_eq!(Some(config), TableConfig::load(&layout).unwrap());
    }

    #[test]
    fn load_a_table_that_was_never_committed_to() {
        let directory = tempfile::tempdir().unwrap();

        assert!(TableConfig::load(&FileLayout::new(directory.path()))
            .unwrap()
            .is_none());
    }
}
