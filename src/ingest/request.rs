use crate::ingest::error::IngestError;
use crate::ingest::ERROR_ID_COLUMN;
use crate::table::options::{
    IndexType, TableType, WriteOperation, WriteOptions, EQUALITY_QUERIES, INDEX_TYPE, OPERATION,
    PARTITION_PATH_FIELD, PRECOMBINE_FIELD, PRECOMMIT_VALIDATORS, RECORD_KEY_FIELD,
    SQL_EQUALITY_VALIDATOR, TABLE_NAME, TABLE_TYPE,
};

const ERROR_TABLE_PREFIX: &str = "error_";

/// Where and how one batch should be written.
///
/// # Examples
///
/// ```
/// use ingestor::ingest::request::IngestRequest;
/// use ingestor::table::options::TableType;
///
/// let request = IngestRequest::new("hudidb", "events", "uuid", "precomb")
///     .with_table_type(TableType::MergeOnRead)
///     .with_validator("SELECT COUNT(*) FROM <TABLE_NAME> WHERE message IS NULL");
///
/// assert_eq!("error_events", request.error_table_name());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRequest {
    pub db_name: String,
    pub table_name: String,
    pub record_key_field: String,
    pub precombine_field: String,
    pub partition_field: Option<String>,
    pub table_type: TableType,
    pub operation: WriteOperation,
    pub index_type: IndexType,
    pub validator_query: Option<String>,
    pub use_validator: bool,
}

impl IngestRequest {
    /// A copy-on-write upsert with a bloom index and no validation.
    pub fn new(db_name: &str, table_name: &str, record_key_field: &str, precombine_field: &str) -> Self {
        Self {
            db_name: db_name.to_string(),
            table_name: table_name.to_string(),
            record_key_field: record_key_field.to_string(),
            precombine_field: precombine_field.to_string(),
            partition_field: None,
            table_type: TableType::CopyOnWrite,
            operation: WriteOperation::Upsert,
            index_type: IndexType::Bloom,
            validator_query: None,
            use_validator: false,
        }
    }

    pub fn with_partition_field(mut self, partition_field: &str) -> Self {
        self.partition_field = Some(partition_field.to_string());
        self
    }

    pub fn with_table_type(mut self, table_type: TableType) -> Self {
        self.table_type = table_type;
        self
    }

    pub fn with_operation(mut self, operation: WriteOperation) -> Self {
        self.operation = operation;
        self
    }

    pub fn with_index_type(mut self, index_type: IndexType) -> Self {
        self.index_type = index_type;
        self
    }

    /// Gates the commit on `query` returning the same result before and after it.
    pub fn with_validator(mut self, query: &str) -> Self {
        self.validator_query = Some(query.to_string());
        self.use_validator = true;
        self
    }

    pub fn error_table_name(&self) -> String {
        format!("{}{}", ERROR_TABLE_PREFIX, self.table_name)
    }

    pub(crate) fn write_options(&self) -> Result<WriteOptions, IngestError> {
        let mut options = WriteOptions::new()
            .with(TABLE_NAME, self.table_name.as_str())
            .with(TABLE_TYPE, self.table_type.to_string())
            .with(RECORD_KEY_FIELD, self.record_key_field.as_str())
            .with(PRECOMBINE_FIELD, self.precombine_field.as_str())
            .with(OPERATION, self.operation.to_string())
            .with(INDEX_TYPE, self.index_type.to_string());

        if let Some(partition_field) = &self.partition_field {
            options = options.with(PARTITION_PATH_FIELD, partition_field.as_str());
        }

        if self.use_validator {
            let query = self
                .validator_query
                .as_deref()
                .map(str::trim)
                .filter(|query| !query.is_empty())
                .ok_or_else(|| IngestError::MissingValidatorQuery(self.table_name.clone()))?;
            options = options
                .with(PRECOMMIT_VALIDATORS, SQL_EQUALITY_VALIDATOR)
                .with(EQUALITY_QUERIES, query);
        }
        Ok(options)
    }

    /// Options for the paired error table: insert-only, keyed by the generated error id.
    pub(crate) fn error_table_options(&self) -> WriteOptions {
        WriteOptions::new()
            .with(TABLE_NAME, self.error_table_name())
            .with(TABLE_TYPE, self.table_type.to_string())
            .with(RECORD_KEY_FIELD, ERROR_ID_COLUMN)
            .with(PRECOMBINE_FIELD, ERROR_ID_COLUMN)
            .with(OPERATION, WriteOperation::Insert.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::options::{ValidatorSpec, WriteConfig};

    #[test]
    fn write_options_for_a_plain_upsert() {
        let request = IngestRequest::new("hudidb", "events", "uuid", "precomb")
            .with_partition_field("partition");

        let config = WriteConfig::try_from(&request.write_options().unwrap()).unwrap();

        assert_eq!("events", config.table_name);
        assert_eq!(TableType::CopyOnWrite, config.table_type);
        assert_eq!("uuid", config.record_key_field);
        assert_eq!(Some("precomb".to_string()), config.precombine_field);
        assert_eq!(Some("partition".to_string()), config.partition_field);
        assert_eq!(WriteOperation::Upsert, config.operation);
        assert_eq!(IndexType::Bloom, config.index_type);
        assert!(config.validators.is_empty());
    }

    #[test]
    fn write_options_carry_the_request_settings() {
        let request = IngestRequest::new("hudidb", "events", "uuid", "precomb")
            .with_table_type(TableType::MergeOnRead)
            .with_operation(WriteOperation::BulkInsert)
            .with_index_type(IndexType::GlobalSimple);

        let config = WriteConfig::try_from(&request.write_options().unwrap()).unwrap();

        assert_eq!(TableType::MergeOnRead, config.table_type);
        assert_eq!(WriteOperation::BulkInsert, config.operation);
        assert_eq!(IndexType::GlobalSimple, config.index_type);
        assert_eq!(None, config.partition_field);
    }

    #[test]
    fn write_options_declare_the_equality_validator() {
        let request = IngestRequest::new("hudidb", "events", "uuid", "precomb")
            .with_validator("SELECT COUNT(*) FROM <TABLE_NAME> WHERE message IS NULL;");

        let config = WriteConfig::try_from(&request.write_options().unwrap()).unwrap();

        assert_eq!(
            vec![ValidatorSpec::SqlEquality(vec![
                "SELECT COUNT(*) FROM <TABLE_NAME> WHERE message IS NULL".to_string()
            ])],
            config.validators
        );
    }

    #[test]
    fn validator_query_is_ignored_unless_validation_is_requested() {
        let mut request = IngestRequest::new("hudidb", "events", "uuid", "precomb");
        request.validator_query = Some("SELECT COUNT(*) FROM <TABLE_NAME>".to_string());

        let options = request.write_options().unwrap();

        assert!(options.get(PRECOMMIT_VALIDATORS).is_none());
    }

    #[test]
    fn attempt_to_validate_without_a_query() {
        let mut request = IngestRequest::new("hudidb", "events", "uuid", "precomb");
        request.use_validator = true;

        let result = request.write_options();

        assert!(matches!(
            result,
            Err(IngestError::MissingValidatorQuery(table)) if table == "events"
        ));
    }

    #[test]
    fn error_table_options() {
        let request = IngestRequest::new("hudidb", "events", "uuid", "precomb")
            .with_table_type(TableType::MergeOnRead)
            .with_partition_field("partition")
            .with_validator("SELECT COUNT(*) FROM <TABLE_NAME>");

        let config = WriteConfig::try_from(&request.error_table_options()).unwrap();

        assert_eq!("error_events", config.table_name);
        assert_eq!(TableType::MergeOnRead, config.table_type);
        assert_eq!("error_id", config.record_key_field);
        assert_eq!(Some("error_id".to_string()), config.precombine_field);
        assert_eq!(None, config.partition_field);
        assert_eq!(WriteOperation::Insert, config.operation);
        assert!(config.validators.is_empty());
    }
}
