use crate::table::error::TableError;
use crate::table::file_layout::{read_json, write_json, FileLayout};
use crate::table::options::{TableType, WriteOperation};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;

const INSTANT_FORMAT: &str = "%Y%m%d%H%M%S%3f";
const INSTANT_LENGTH: usize = 17;
const INFLIGHT_SUFFIX: &str = ".inflight";
const COMMIT_SUFFIX: &str = ".commit";

/// A commit timestamp in `yyyyMMddHHmmssSSS` form. Instants order lexically and numerically
/// alike.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instant(String);

impl Instant {
    pub fn parse(text: &str) -> Result<Instant, TableError> {
        if text.len() != INSTANT_LENGTH || !text.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(TableError::InvalidInstant(text.to_string()));
        }
        Ok(Instant(text.to_string()))
    }

    /// The current time, or one millisecond past `latest` when the clock has not moved past it.
    pub(crate) fn next_after(latest: Option<&Instant>) -> Instant {
        let now = Instant(Utc::now().format(INSTANT_FORMAT).to_string());
        match latest {
            Some(latest) if &now <= latest => latest.successor(),
            _ => now,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn successor(&self) -> Instant {
        //SAFETY: instants are validated to be 17 ascii digits, which always fit in u64.
        let value: u64 = self.0.parse().unwrap();
        Instant(format!("{:0width$}", value + 1, width = INSTANT_LENGTH))
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Instant {
    type Error = TableError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Instant::parse(&text)
    }
}

impl From<Instant> for String {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Base,
    Log,
}

/// One data file written by a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteStat {
    pub partition_path: String,
    pub file_name: String,
    pub file_kind: FileKind,
    pub num_inserts: usize,
    pub num_updates: usize,
    pub num_writes: usize,
}

/// Contents of a `.commit` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMetadata {
    pub instant: Instant,
    pub operation: WriteOperation,
    pub table_type: TableType,
    pub write_stats: Vec<WriteStat>,
}

#[derive(Debug, Serialize, Deserialize)]
struct InflightMarker {
    operation: WriteOperation,
}

/// The `.meta` directory of a table: which commits started and which completed.
pub(crate) struct Timeline {
    layout: FileLayout,
}

impl Timeline {
    pub(crate) fn new(layout: FileLayout) -> Self {
        Self { layout }
    }

    /// Completed instants in commit order.
    pub(crate) fn completed_instants(&self) -> Result<Vec<Instant>, TableError> {
        self.instants_with_suffix(COMMIT_SUFFIX)
    }

    /// The instant for a new commit, strictly after every instant seen on the timeline,
    /// including ones that never completed.
    pub(crate) fn next_instant(&self) -> Result<Instant, TableError> {
        let latest = self
            .completed_instants()?
            .into_iter()
            .chain(self.instants_with_suffix(INFLIGHT_SUFFIX)?)
            .max();
        Ok(Instant::next_after(latest.as_ref()))
    }

    pub(crate) fn read_commit(&self, instant: &Instant) -> Result<CommitMetadata, TableError> {
        read_json(&self.instant_path(instant, COMMIT_SUFFIX))
    }

    pub(crate) fn begin(
        &self,
        instant: &Instant,
        operation: WriteOperation,
    ) -> Result<(), TableError> {
        write_json(
            &self.instant_path(instant, INFLIGHT_SUFFIX),
            &InflightMarker { operation },
        )
    }

    /// Publishes the commit and then clears its inflight marker.
    pub(crate) fn complete(&self, metadata: &CommitMetadata) -> Result<(), TableError> {
        write_json(&self.instant_path(&metadata.instant, COMMIT_SUFFIX), metadata)?;

        let inflight = self.instant_path(&metadata.instant, INFLIGHT_SUFFIX);
        fs::remove_file(&inflight).map_err(|err| TableError::io(&inflight, err))
    }

    fn instants_with_suffix(&self, suffix: &str) -> Result<Vec<Instant>, TableError> {
        let directory = self.layout.meta_directory();
        if !directory.exists() {
            return Ok(Vec::new());
        }

        let mut instants = Vec::new();
        for entry in fs::read_dir(&directory).map_err(|err| TableError::io(&directory, err))? {
            let entry = entry.map_err(|err| TableError::io(&directory, err))?;
            let file_name = entry.file_name();
            if let Some(instant) = file_name
                .to_str()
                .and_then(|name| name.strip_suffix(suffix))
            {
                instants.push(Instant::parse(instant)?);
            }
        }
        instants.sort();
        Ok(instants)
    }

    fn instant_path(&self, instant: &Instant, suffix: &str) -> std::path::PathBuf {
        self.layout
            .meta_directory()
            .join(format!("{}{}", instant, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(instant: &Instant) -> CommitMetadata {
        CommitMetadata {
            instant: instant.clone(),
            operation: WriteOperation::Upsert,
            table_type: TableType::CopyOnWrite,
            write_stats: vec![WriteStat {
                partition_path: "1".to_string(),
                file_name: "f_1.base.json".to_string(),
                file_kind: FileKind::Base,
                num_inserts: 1,
                num_updates: 0,
                num_writes: 1,
            }],
        }
    }

    #[test]
    fn parse_instant() {
        let instant = Instant::parse("20261018093015123").unwrap();

        assert_eq!("20261018093015123", instant.as_str());
    }

    #[test]
    fn attempt_to_parse_a_malformed_instant() {
        assert!(matches!(
            Instant::parse("2026-10-18"),
            Err(TableError::InvalidInstant(text)) if text == "2026-10-18"
        ));
    }

    #[test]
    fn next_instant_is_strictly_after_a_future_instant() {
        let future = Instant::parse("99991231235959998").unwrap();

        let next = Instant::next_after(Some(&future));

        assert_eq!("99991231235959999", next.as_str());
    }

    #[test]
    fn next_instant_uses_the_clock_when_it_has_advanced() {
        let past = Instant::parse("20000101000000000").unwrap();

        let next = Instant::next_after(Some(&past));

        assert!(next > past);
        assert_eq!(17, next.as_str().len());
    }

    #[test]
    fn instants_serialize_as_strings() {
        let instant = Instant::parse("20261018093015123").unwrap();

        let json = serde_json::to_string(&instant).unwrap();

        assert_eq!("\"20261018093015123\"", json);
        assert_eq!(instant, serde_json::from_str::<Instant>(&json).unwrap());
        assert!(serde_json::from_str::<Instant>("\"later\"").is_err());
    }

    #[test]
    fn begin_and_complete_a_commit() {
        let directory = tempfile::tempdir().unwrap();
        let timeline = Timeline::new(FileLayout::new(directory.path()));
        let instant = timeline.next_instant().unwrap();

        timeline.begin(&instant, WriteOperation::Upsert).unwrap();
        assert!(timeline.completed_instants().unwrap().is_empty());

        timeline.complete(&commit(&instant)).unwrap();

        assert_eq!(vec![instant.clone()], timeline.completed_instants().unwrap());
        assert_eq!(commit(&instant), timeline.read_commit(&instant).unwrap());
    }

    #[test]
    fn next_instant_passes_an_abandoned_inflight() {
        let directory = tempfile::tempdir().unwrap();
        let timeline = Timeline::new(FileLayout::new(directory.path()));
        let abandoned = Instant::parse("99991231235959000").unwrap();
        timeline.begin(&abandoned, WriteOperation::Insert).unwrap();

        let next = timeline.next_instant().unwrap();

        assert!(next > abandoned);
        assert!(timeline.completed_instants().unwrap().is_empty());
    }

    #[test]
    fn completed_instants_are_sorted() {
        let directory = tempfile::tempdir().unwrap();
        let timeline = Timeline::new(FileLayout::new(directory.path()));
        let later = Instant::parse("20261018093015200").unwrap();
        let earlier = Instant::parse("20261018093015100").unwrap();

        for instant in [&later, &earlier] {
            timeline.begin(instant, WriteOperation::Upsert).unwrap();
            timeline.complete(&commit(instant)).unwrap();
        }

        assert_eq!(vec![earlier, later], timeline.completed_instants().unwrap());
    }
}
