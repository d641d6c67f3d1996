use crate::table::options::IndexType;
use crate::table::snapshot::TableSnapshot;
use crate::types::column_value::ColumnValue;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IndexKey {
    partition_path: Option<String>,
    record_key: String,
}

/// Where a record key currently lives, with the precombine value it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordLocation {
    pub(crate) partition_path: String,
    pub(crate) precombine: ColumnValue,
}

/// An in-memory index from record key to its location in the table.
///
/// Non-global indexes key records by `(partition, record key)`, so the same key may live in
/// several partitions. Global indexes key records by record key alone. Bloom variants are
/// resolved exactly, like their simple counterparts.
pub(crate) struct RecordIndex {
    global: bool,
    index: HashMap<IndexKey, RecordLocation>,
}

impl RecordIndex {
    pub(crate) fn new(index_type: IndexType) -> RecordIndex {
        Self {
            global: index_type.is_global(),
            index: HashMap::new(),
        }
    }

    /// Indexes every record visible in `snapshot`. A later record overrides an earlier one
    /// with the same key.
    pub(crate) fn build(index_type: IndexType, snapshot: &TableSnapshot) -> RecordIndex {
        let mut index = RecordIndex::new(index_type);
        for record in snapshot.records() {
            index.insert(
                &record.record_key,
                &record.partition_path,
                snapshot.precombine_value(&record.row).clone(),
            );
        }
        index
    }

    pub(crate) fn insert(&mut self, record_key: &str, partition_path: &str, precombine: ColumnValue) {
        self.index.insert(
            self.key(record_key, partition_path),
            RecordLocation {
                partition_path: partition_path.to_string(),
                precombine,
            },
        );
    }

    /// Looks up `record_key`. `partition_path` is ignored by global indexes.
    pub(crate) fn locate(&self, record_key: &str, partition_path: &str) -> Option<&RecordLocation> {
        self.index.get(&self.key(record_key, partition_path))
    }

    fn key(&self, record_key: &str, partition_path: &str) -> IndexKey {
        IndexKey {
            partition_path: (!self.global).then(|| partition_path.to_string()),
            record_key: record_key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::options::TableType;
    use crate::table::snapshot::tests::{events_config, stored};

    #[test]
    fn locate_a_record_in_its_partition() {
        let mut index = RecordIndex::new(IndexType::Simple);
        index.insert("1", "1", ColumnValue::int(111));

        let location = index.locate("1", "1").unwrap();

        assert_eq!("1", location.partition_path);
        assert_eq!(ColumnValue::int(111), location.precombine);
    }

    #[test]
    fn non_global_index_does_not_match_across_partitions() {
        let mut index = RecordIndex::new(IndexType::Bloom);
        index.insert("1", "1", ColumnValue::int(111));

        assert!(index.locate("1", "2").is_none());
    }

    #[test]
    fn global_index_matches_across_partitions() {
        let mut index = RecordIndex::new(IndexType::GlobalSimple);
        index.insert("1", "1", ColumnValue::int(111));

        let location = index.locate("1", "2").unwrap();

        assert_eq!("1", location.partition_path);
    }

    #[test]
    fn attempt_to_locate_a_missing_key() {
        let index = RecordIndex::new(IndexType::InMemory);

        assert!(index.locate("1", "1").is_none());
    }

    #[test]
    fn build_from_a_snapshot() {
        let mut snapshot = TableSnapshot::empty(events_config(TableType::CopyOnWrite));
        snapshot.append("1", "f_1", vec![stored(1, "A", 111, "1")]);
        snapshot.append("2", "f_2", vec![stored(2, "B", 222, "2")]);

        let index = RecordIndex::build(IndexType::GlobalBloom, &snapshot);

        assert_eq!(
            Some(&RecordLocation {
                partition_path: "2".to_string(),
                precombine: ColumnValue::int(222),
            }),
            index.locate("2", "")
        );
    }
}
