use crate::storage::batch::RecordBatch;
use crate::storage::row::Row;
use crate::table::config::TableConfig;
use crate::table::error::WriteError;
use crate::table::file_layout::{write_json, FileLayout};
use crate::table::index::RecordIndex;
use crate::table::options::{TableType, WriteConfig, WriteOperation, WriteOptions};
use crate::table::snapshot::{StoredRecord, TableSnapshot};
use crate::table::timeline::{CommitMetadata, FileKind, Instant, Timeline, WriteStat};
use crate::table::validator::{validator_for, ValidationContext};
use crate::types::column_value::ColumnValue;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Partition of records whose partition field is null.
pub const DEFAULT_PARTITION_PATH: &str = "default";

/// What a completed commit wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub table_name: String,
    pub instant: Instant,
    pub operation: WriteOperation,
    pub num_inserts: usize,
    pub num_updates: usize,
    pub partitions: Vec<String>,
}

struct IncomingRecord {
    record_key: String,
    partition_path: String,
    precombine: ColumnValue,
    row: Row,
}

#[derive(Default)]
struct PartitionWrite {
    records: Vec<StoredRecord>,
    num_inserts: usize,
    num_updates: usize,
}

struct FieldPositions {
    record_key: usize,
    precombine: Option<usize>,
    partition: Option<usize>,
}

/// Commits record batches to the table at one path.
///
/// A write is staged in memory, validated, and only then persisted as
/// `inflight -> data files -> commit`. Readers see the batch once the commit file exists.
pub struct TableWriter {
    layout: FileLayout,
}

impl TableWriter {
    pub fn new(table_path: &Path) -> TableWriter {
        Self {
            layout: FileLayout::new(table_path),
        }
    }

    pub fn write(
        &self,
        batch: &RecordBatch,
        options: &WriteOptions,
    ) -> Result<CommitSummary, WriteError> {
        let config = WriteConfig::try_from(options)?;
        let existing = TableConfig::load(&self.layout)?;
        let is_new_table = existing.is_none();
        let table_config = match existing {
            Some(table_config) => {
                Self::ensure_compatible(&table_config, &config, batch)?;
                table_config
            }
            None => TableConfig::from_write_config(&config, batch.schema()),
        };

        let positions = Self::field_positions(&config, batch)?;
        let mut incoming = Self::incoming_records(&config, &positions, batch)?;
        if config.operation == WriteOperation::Upsert {
            incoming = Self::combine(incoming, config.index_type.is_global());
        }

        let before = if is_new_table {
            TableSnapshot::empty(table_config.clone())
        } else {
            TableSnapshot::load(self.layout.table_path())?
        };
        let timeline = Timeline::new(self.layout.clone());
        let instant = timeline.next_instant()?;

        let partitions = Self::tag(&config, &before, incoming, &instant);
        let (after, files) =
            Self::stage(&table_config, config.operation, &before, partitions, &instant);

        if !config.validators.is_empty() {
            let context = ValidationContext::new(&config.table_name, &before, &after)?;
            for spec in &config.validators {
                validator_for(spec).validate(&context)?;
            }
            debug!(
                table = %config.table_name,
                validators = config.validators.len(),
                "precommit validation passed"
            );
        }

        timeline.begin(&instant, config.operation)?;
        for (stat, records) in &files {
            write_json(
                &self
                    .layout
                    .data_file_path(&stat.partition_path, &stat.file_name),
                records,
            )?;
        }
        if is_new_table {
            table_config.store(&self.layout)?;
        }
        let metadata = CommitMetadata {
            instant: instant.clone(),
            operation: config.operation,
            table_type: table_config.table_type,
            write_stats: files.into_iter().map(|(stat, _)| stat).collect(),
        };
        timeline.complete(&metadata)?;

        let summary = CommitSummary {
            table_name: config.table_name,
            instant,
            operation: config.operation,
            num_inserts: metadata.write_stats.iter().map(|stat| stat.num_inserts).sum(),
            num_updates: metadata.write_stats.iter().map(|stat| stat.num_updates).sum(),
            partitions: metadata
                .write_stats
                .iter()
                .map(|stat| stat.partition_path.clone())
                .collect(),
        };
        info!(
            table = %summary.table_name,
            instant = %summary.instant,
            operation = %summary.operation,
            inserts = summary.num_inserts,
            updates = summary.num_updates,
            "committed"
        );
        Ok(summary)
    }

    fn ensure_compatible(
        table_config: &TableConfig,
        config: &WriteConfig,
        batch: &RecordBatch,
    ) -> Result<(), WriteError> {
        if &table_config.schema != batch.schema() {
            return Err(WriteError::SchemaMismatch(table_config.name.clone()));
        }
        if table_config.record_key_field != config.record_key_field {
            return Err(WriteError::RecordKeyMismatch {
                expected: table_config.record_key_field.clone(),
                actual: config.record_key_field.clone(),
            });
        }
        if table_config.table_type != config.table_type {
            return Err(WriteError::TableTypeMismatch {
                expected: table_config.table_type.to_string(),
                actual: config.table_type.to_string(),
            });
        }
        if table_config.precombine_field != config.precombine_field {
            return Err(WriteError::PrecombineFieldMismatch {
                expected: table_config.precombine_field.clone(),
                actual: config.precombine_field.clone(),
            });
        }
        if table_config.partition_field != config.partition_field {
            return Err(WriteError::PartitionFieldMismatch {
                expected: table_config.partition_field.clone(),
                actual: config.partition_field.clone(),
            });
        }
        Ok(())
    }

    fn field_positions(
        config: &WriteConfig,
        batch: &RecordBatch,
    ) -> Result<FieldPositions, WriteError> {
        let position = |field: &str| {
            batch
                .schema()
                .column_position(field)
                .ok_or_else(|| WriteError::MissingField(field.to_string()))
        };
        Ok(FieldPositions {
            record_key: position(config.record_key_field.as_str())?,
            precombine: config.precombine_field.as_deref().map(position).transpose()?,
            partition: config.partition_field.as_deref().map(position).transpose()?,
        })
    }

    fn incoming_records(
        config: &WriteConfig,
        positions: &FieldPositions,
        batch: &RecordBatch,
    ) -> Result<Vec<IncomingRecord>, WriteError> {
        let value_at = |row: &Row, position: usize| {
            row.column_value_at(position)
                .cloned()
                .unwrap_or(ColumnValue::Null)
        };

        let mut records = Vec::with_capacity(batch.row_count());
        for (index, row) in batch.rows().iter().enumerate() {
            let record_key = value_at(row, positions.record_key);
            if record_key.is_null() {
                return Err(WriteError::NullRecordKey { row: index });
            }

            let precombine = positions
                .precombine
                .map(|position| value_at(row, position))
                .unwrap_or(ColumnValue::Null);
            if precombine.is_null() && config.operation == WriteOperation::Upsert {
                return Err(WriteError::NullPrecombine { row: index });
            }

            let partition_path = match positions.partition.map(|position| value_at(row, position)) {
                None => String::new(),
                Some(ColumnValue::Null) => DEFAULT_PARTITION_PATH.to_string(),
                Some(value) => {
                    let value = value.to_string();
                    if !Self::is_valid_partition_path(&value) {
                        return Err(WriteError::InvalidPartitionPath { row: index, value });
                    }
                    value
                }
            };

            records.push(IncomingRecord {
                record_key: record_key.to_string(),
                partition_path,
                precombine,
                row: row.clone(),
            });
        }
        Ok(records)
    }

    /// A partition value becomes a single directory under the table, so it must name one.
    fn is_valid_partition_path(value: &str) -> bool {
        !value.is_empty()
            && value != "."
            && value != ".."
            && !value.contains(['/', '\\', '\0'])
    }

    /// Keeps one record per key: the one with the greatest precombine value, the later one on
    /// ties. The survivor takes the position of the key's first occurrence.
    fn combine(records: Vec<IncomingRecord>, global: bool) -> Vec<IncomingRecord> {
        let mut positions: HashMap<(Option<String>, String), usize> = HashMap::new();
        let mut combined: Vec<IncomingRecord> = Vec::with_capacity(records.len());

        for record in records {
            let key = (
                (!global).then(|| record.partition_path.clone()),
                record.record_key.clone(),
            );
            match positions.get(&key) {
                Some(&position) => {
                    let kept = &combined[position];
                    if kept.precombine.partial_compare(&record.precombine) != Some(Ordering::Greater) {
                        combined[position] = record;
                    }
                }
                None => {
                    positions.insert(key, combined.len());
                    combined.push(record);
                }
            }
        }
        combined
    }

    /// Groups records by partition, marking each as an insert or an update. An upsert whose
    /// stored counterpart has a greater precombine value is dropped.
    fn tag(
        config: &WriteConfig,
        before: &TableSnapshot,
        incoming: Vec<IncomingRecord>,
        instant: &Instant,
    ) -> BTreeMap<String, PartitionWrite> {
        let index = (config.operation == WriteOperation::Upsert)
            .then(|| RecordIndex::build(config.index_type, before));

        let mut partitions: BTreeMap<String, PartitionWrite> = BTreeMap::new();
        for mut record in incoming {
            let mut is_update = false;
            if let Some(location) = index
                .as_ref()
                .and_then(|index| index.locate(&record.record_key, &record.partition_path))
            {
                if location.precombine.partial_compare(&record.precombine) == Some(Ordering::Greater) {
                    continue;
                }
                record.partition_path = location.partition_path.clone();
                is_update = true;
            }

            let partition = partitions.entry(record.partition_path.clone()).or_default();
            if is_update {
                partition.num_updates += 1;
            } else {
                partition.num_inserts += 1;
            }
            partition.records.push(StoredRecord {
                commit_time: instant.clone(),
                commit_seqno: String::new(),
                record_key: record.record_key,
                partition_path: record.partition_path,
                row: record.row,
            });
        }

        for (file_index, partition) in partitions.values_mut().enumerate() {
            for (record_index, record) in partition.records.iter_mut().enumerate() {
                record.commit_seqno = format!("{}_{}_{}", instant, file_index, record_index);
            }
        }
        partitions
    }

    /// Applies the write to a copy of `before`, returning the resulting snapshot and the data
    /// files to persist.
    fn stage(
        table_config: &TableConfig,
        operation: WriteOperation,
        before: &TableSnapshot,
        partitions: BTreeMap<String, PartitionWrite>,
        instant: &Instant,
    ) -> (TableSnapshot, Vec<(WriteStat, Vec<StoredRecord>)>) {
        let mut after = before.clone();
        let mut files = Vec::with_capacity(partitions.len());

        for (partition_path, write) in partitions {
            let file_id = Uuid::new_v4().to_string();
            let file_name = match table_config.table_type {
                TableType::CopyOnWrite => FileLayout::base_file_name(&file_id, instant),
                TableType::MergeOnRead => FileLayout::log_file_name(&file_id, instant),
            };

            match operation {
                WriteOperation::Upsert => {
                    after.merge(&partition_path, &file_name, write.records.clone())
                }
                WriteOperation::Insert | WriteOperation::BulkInsert => {
                    after.append(&partition_path, &file_name, write.records.clone())
                }
            }

            let (file_kind, records) = match table_config.table_type {
                TableType::CopyOnWrite => {
                    let contents = after.partition_records(&partition_path);
                    after.replace(&partition_path, &file_name, contents.clone());
                    (FileKind::Base, contents)
                }
                TableType::MergeOnRead => (FileKind::Log, write.records),
            };

            files.push((
                WriteStat {
                    partition_path,
                    file_name,
                    file_kind,
                    num_inserts: write.num_inserts,
                    num_updates: write.num_updates,
                    num_writes: records.len(),
                },
                records,
            ));
        }
        (after, files)
    }
}
