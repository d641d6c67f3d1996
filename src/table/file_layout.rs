use crate::table::error::TableError;
use crate::table::timeline::Instant;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const META_DIRECTORY: &str = ".meta";
const TABLE_CONFIG_FILE: &str = "table.json";
const BASE_FILE_SUFFIX: &str = "base.json";
const LOG_FILE_SUFFIX: &str = "log.json";

/// Where a table keeps its files.
///
/// ```text
/// <table>/.meta/table.json
/// <table>/.meta/<instant>.inflight
/// <table>/.meta/<instant>.commit
/// <table>/<partition>/<file_id>_<instant>.base.json
/// <table>/<partition>/<file_id>_<instant>.log.json
/// ```
///
/// Records of a non-partitioned table live directly under the table directory.
#[derive(Debug, Clone)]
pub(crate) struct FileLayout {
    table_path: PathBuf,
}

impl FileLayout {
    pub(crate) fn new(table_path: &Path) -> Self {
        Self {
            table_path: table_path.to_path_buf(),
        }
    }

    pub(crate) fn table_path(&self) -> &Path {
        &self.table_path
    }

    pub(crate) fn meta_directory(&self) -> PathBuf {
        self.table_path.join(META_DIRECTORY)
    }

    pub(crate) fn table_config_path(&self) -> PathBuf {
        self.meta_directory().join(TABLE_CONFIG_FILE)
    }

    pub(crate) fn data_file_path(&self, partition_path: &str, file_name: &str) -> PathBuf {
        if partition_path.is_empty() {
            return self.table_path.join(file_name);
        }
        self.table_path.join(partition_path).join(file_name)
    }

    pub(crate) fn base_file_name(file_id: &str, instant: &Instant) -> String {
        format!("{}_{}.{}", file_id, instant, BASE_FILE_SUFFIX)
    }

    pub(crate) fn log_file_name(file_id: &str, instant: &Instant) -> String {
        format!("{}_{}.{}", file_id, instant, LOG_FILE_SUFFIX)
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TableError> {
    let bytes = fs::read(path).map_err(|err| TableError::io(path, err))?;
    serde_json::from_slice(&bytes).map_err(|err| TableError::json(path, err))
}

/// Writes `value` next to `path` and renames it into place, so readers never see a partial file.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| TableError::io(parent, err))?;
    }
    let bytes = serde_json::to_vec_pretty(value).map_err(|err| TableError::json(path, err))?;

    let staging_path = path.with_extension("tmp");
    fs::write(&staging_path, bytes).map_err(|err| TableError::io(&staging_path, err))?;
    fs::rename(&staging_path, path).map_err(|err| TableError::io(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Marker {
        name: String,
    }

    #[test]
    fn data_file_path_of_a_partition() {
        let layout = FileLayout::new(Path::new("/warehouse/hudidb/events"));

        assert_eq!(
            PathBuf::from("/warehouse/hudidb/events/1/f_1.base.json"),
            layout.data_file_path("1", "f_1.base.json")
        );
    }

    #[test]
    fn data_file_path_of_a_non_partitioned_table() {
        let layout = FileLayout::new(Path::new("/warehouse/hudidb/events"));

        assert_eq!(
            PathBuf::from("/warehouse/hudidb/events/f_1.base.json"),
            layout.data_file_path("", "f_1.base.json")
        );
    }

    #[test]
    fn file_names_carry_the_instant() {
        let instant = Instant::parse("20260101120000000").unwrap();

        assert_eq!(
            "abc_20260101120000000.base.json",
            FileLayout::base_file_name("abc", &instant)
        );
        assert_eq!(
            "abc_20260101120000000.log.json",
            FileLayout::log_file_name("abc", &instant)
        );
    }

    #[test]
    fn write_and_read_json() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("nested").join("marker.json");

        write_json(&path, &Marker {
            name: "events".to_string(),
        })
        .unwrap();

        let marker: Marker = read_json(&path).unwrap();
        assert_eq!("events", marker.name);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn read_missing_json() {
        let directory = tempfile::tempdir().unwrap();

        let result: Result<Marker, _> = read_json(&directory.path().join("absent.json"));

        assert!(matches!(result, Err(TableError::Io { .. })));
    }

    #[test]
    fn read_malformed_json() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("marker.json");
        fs::write(&path, "{").unwrap();

        let result: Result<Marker, _> = read_json(&path);

        assert!(matches!(result, Err(TableError::Json { .. })));
    }
}
