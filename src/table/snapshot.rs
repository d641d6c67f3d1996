use crate::schema::column::Column;
use crate::schema::Schema;
use crate::storage::batch::RecordBatch;
use crate::storage::row::Row;
use crate::table::config::TableConfig;
use crate::table::error::TableError;
use crate::table::file_layout::{read_json, FileLayout};
use crate::table::options::WriteOperation;
use crate::table::timeline::{FileKind, Instant, Timeline};
use crate::types::column_type::ColumnType;
use crate::types::column_value::ColumnValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const COMMIT_TIME_COLUMN: &str = "_commit_time";
pub const COMMIT_SEQNO_COLUMN: &str = "_commit_seqno";
pub const RECORD_KEY_COLUMN: &str = "_record_key";
pub const PARTITION_PATH_COLUMN: &str = "_partition_path";
pub const FILE_NAME_COLUMN: &str = "_file_name";

static NULL_VALUE: ColumnValue = ColumnValue::Null;

const META_COLUMNS: [&str; 5] = [
    COMMIT_TIME_COLUMN,
    COMMIT_SEQNO_COLUMN,
    RECORD_KEY_COLUMN,
    PARTITION_PATH_COLUMN,
    FILE_NAME_COLUMN,
];

/// A record as it is kept in a data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredRecord {
    pub(crate) commit_time: Instant,
    pub(crate) commit_seqno: String,
    pub(crate) record_key: String,
    pub(crate) partition_path: String,
    pub(crate) row: Row,
}

#[derive(Debug, Clone, PartialEq)]
struct SnapshotRecord {
    record: StoredRecord,
    file_name: String,
}

/// The visible contents of a table as of its latest completed commit.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    config: TableConfig,
    partitions: BTreeMap<String, Vec<SnapshotRecord>>,
}

impl TableSnapshot {
    pub(crate) fn empty(config: TableConfig) -> Self {
        Self {
            config,
            partitions: BTreeMap::new(),
        }
    }

    /// Replays every completed commit of the table at `table_path`, in instant order.
    ///
    /// Files written by commits that never completed are not referenced by any commit and
    /// are therefore never read.
    pub fn load(table_path: &Path) -> Result<TableSnapshot, TableError> {
        let layout = FileLayout::new(table_path);
        let config = TableConfig::load(&layout)?
            .ok_or_else(|| TableError::TableNotFound(table_path.to_path_buf()))?;

        let timeline = Timeline::new(layout.clone());
        let instants = timeline.completed_instants()?;

        let mut snapshot = TableSnapshot::empty(config);
        for instant in &instants {
            let commit = timeline.read_commit(instant)?;
            for stat in &commit.write_stats {
                let records: Vec<StoredRecord> =
                    read_json(&layout.data_file_path(&stat.partition_path, &stat.file_name))?;
                match (stat.file_kind, commit.operation) {
                    (FileKind::Base, _) => {
                        snapshot.replace(&stat.partition_path, &stat.file_name, records)
                    }
                    (FileKind::Log, WriteOperation::Upsert) => {
                        snapshot.merge(&stat.partition_path, &stat.file_name, records)
                    }
                    (FileKind::Log, _) => {
                        snapshot.append(&stat.partition_path, &stat.file_name, records)
                    }
                }
            }
        }

        debug!(
            table = %snapshot.config.name,
            commits = instants.len(),
            records = snapshot.record_count(),
            "loaded table snapshot"
        );
        Ok(snapshot)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn record_count(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    /// Metadata columns followed by the table's data columns.
    pub fn schema(&self) -> Result<Schema, TableError> {
        let meta_columns = META_COLUMNS
            .iter()
            .map(|name| Column::new(name, ColumnType::Text, false))
            .collect();
        Ok(self.config.schema.with_leading_columns(meta_columns)?)
    }

    /// Rows in partition order, each prefixed with its metadata values.
    pub fn rows(&self) -> Vec<Row> {
        self.partitions
            .values()
            .flatten()
            .map(|entry| {
                entry.record.row.prepend(vec![
                    ColumnValue::text(entry.record.commit_time.as_str()),
                    ColumnValue::text(entry.record.commit_seqno.as_str()),
                    ColumnValue::text(entry.record.record_key.as_str()),
                    ColumnValue::text(entry.record.partition_path.as_str()),
                    ColumnValue::text(entry.file_name.as_str()),
                ])
            })
            .collect()
    }

    pub fn to_batch(&self) -> Result<RecordBatch, TableError> {
        Ok(RecordBatch::try_new(self.schema()?, self.rows())?)
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &StoredRecord> {
        self.partitions
            .values()
            .flatten()
            .map(|entry| &entry.record)
    }

    pub(crate) fn partition_records(&self, partition_path: &str) -> Vec<StoredRecord> {
        self.partitions
            .get(partition_path)
            .map(|entries| entries.iter().map(|entry| entry.record.clone()).collect())
            .unwrap_or_default()
    }

    /// Precombine value of `row`, `Null` when the table has no precombine field.
    pub(crate) fn precombine_value<'a>(&self, row: &'a Row) -> &'a ColumnValue {
        self.config
            .precombine_field
            .as_deref()
            .and_then(|field| self.config.schema.column_position(field))
            .and_then(|position| row.column_value_at(position))
            .unwrap_or(&NULL_VALUE)
    }

    pub(crate) fn replace(
        &mut self,
        partition_path: &str,
        file_name: &str,
        records: Vec<StoredRecord>,
    ) {
        self.partitions.insert(
            partition_path.to_string(),
            Self::entries(file_name, records),
        );
    }

    pub(crate) fn append(
        &mut self,
        partition_path: &str,
        file_name: &str,
        records: Vec<StoredRecord>,
    ) {
        self.partitions
            .entry(partition_path.to_string())
            .or_default()
            .extend(Self::entries(file_name, records));
    }

    /// Merges `records` by record key. An existing record survives only when its precombine
    /// value is greater than the incoming one.
    pub(crate) fn merge(
        &mut self,
        partition_path: &str,
        file_name: &str,
        records: Vec<StoredRecord>,
    ) {
        let mut entries = self.partitions.remove(partition_path).unwrap_or_default();
        for incoming in Self::entries(file_name, records) {
            let existing = entries
                .iter()
                .position(|entry| entry.record.record_key == incoming.record.record_key);
            match existing {
                Some(position) => {
                    if !self.existing_wins(&entries[position].record, &incoming.record) {
                        entries[position] = incoming;
                    }
                }
                None => entries.push(incoming),
            }
        }
        self.partitions.insert(partition_path.to_string(), entries);
    }

    fn existing_wins(&self, existing: &StoredRecord, incoming: &StoredRecord) -> bool {
        let existing = self.precombine_value(&existing.row);
        let incoming = self.precombine_value(&incoming.row);
        matches!(existing.partial_compare(incoming), Some(Ordering::Greater))
    }

    fn entries(file_name: &str, records: Vec<StoredRecord>) -> Vec<SnapshotRecord> {
        records
            .into_iter()
            .map(|record| SnapshotRecord {
                record,
                file_name: file_name.to_string(),
            })
            .collect()
    }
}
