use crate::table::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const TABLE_NAME: &str = "table.name";
pub const TABLE_TYPE: &str = "table.type";
pub const RECORD_KEY_FIELD: &str = "write.recordkey.field";
pub const PRECOMBINE_FIELD: &str = "write.precombine.field";
pub const PARTITION_PATH_FIELD: &str = "write.partitionpath.field";
pub const OPERATION: &str = "write.operation";
pub const INDEX_TYPE: &str = "index.type";
pub const PRECOMMIT_VALIDATORS: &str = "precommit.validators";
pub const EQUALITY_QUERIES: &str = "precommit.validators.equality.sql.queries";
pub const INEQUALITY_QUERIES: &str = "precommit.validators.inequality.sql.queries";
pub const SINGLE_RESULT_QUERIES: &str = "precommit.validators.single.result.sql.queries";

pub const SQL_EQUALITY_VALIDATOR: &str = "sql.equality";
pub const SQL_INEQUALITY_VALIDATOR: &str = "sql.inequality";
pub const SQL_SINGLE_RESULT_VALIDATOR: &str = "sql.single.result";

/// String-keyed write options, handed to the table format as-is.
///
/// # Examples
///
/// ```
/// use ingestor::table::options::{WriteOptions, RECORD_KEY_FIELD, TABLE_NAME};
///
/// let options = WriteOptions::new()
///     .with(TABLE_NAME, "events")
///     .with(RECORD_KEY_FIELD, "uuid");
/// assert_eq!(Some("events"), options.get(TABLE_NAME));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    options: BTreeMap<String, String>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.non_blank(key)
            .ok_or_else(|| ConfigError::MissingOption(key.to_string()))
    }

    fn non_blank(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = ConfigError>,
    {
        match self.non_blank(key) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableType {
    /// Every write rewrites the touched partitions in full.
    CopyOnWrite,
    /// Writes append log files that readers merge onto the base.
    MergeOnRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOperation {
    Upsert,
    Insert,
    BulkInsert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    Bloom,
    Simple,
    GlobalBloom,
    GlobalSimple,
    InMemory,
}

impl IndexType {
    /// Global indexes match record keys across partitions.
    pub fn is_global(&self) -> bool {
        matches!(self, IndexType::GlobalBloom | IndexType::GlobalSimple)
    }
}

macro_rules! option_value {
    ($type:ty, $key:expr, { $($variant:path => $text:literal),+ $(,)? }) => {
        impl FromStr for $type {
            type Err = ConfigError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                $(
                    if value.eq_ignore_ascii_case($text) {
                        return Ok($variant);
                    }
                )+
                Err(ConfigError::InvalidValue {
                    key: $key.to_string(),
                    value: value.to_string(),
                })
            }
        }

        impl Display for $type {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let text = match self {
                    $($variant => $text),+
                };
                write!(f, "{}", text)
            }
        }
    };
}

option_value!(TableType, TABLE_TYPE, {
    TableType::CopyOnWrite => "COPY_ON_WRITE",
    TableType::MergeOnRead => "MERGE_ON_READ",
});

option_value!(WriteOperation, OPERATION, {
    WriteOperation::Upsert => "upsert",
    WriteOperation::Insert => "insert",
    WriteOperation::BulkInsert => "bulk_insert",
});

option_value!(IndexType, INDEX_TYPE, {
    IndexType::Bloom => "BLOOM",
    IndexType::Simple => "SIMPLE",
    IndexType::GlobalBloom => "GLOBAL_BLOOM",
    IndexType::GlobalSimple => "GLOBAL_SIMPLE",
    IndexType::InMemory => "INMEMORY",
});

/// A precommit check, with the queries it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorSpec {
    /// Each query must return the same result before and after the commit.
    SqlEquality(Vec<String>),
    /// Each query must return a different result after the commit.
    SqlInequality(Vec<String>),
    /// Each query must return exactly the expected single value after the commit.
    SqlSingleResult(Vec<(String, String)>),
}

/// Typed view of [`WriteOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConfig {
    pub table_name: String,
    pub table_type: TableType,
    pub record_key_field: String,
    pub precombine_field: Option<String>,
    pub partition_field: Option<String>,
    pub operation: WriteOperation,
    pub index_type: IndexType,
    pub validators: Vec<ValidatorSpec>,
}

impl TryFrom<&WriteOptions> for WriteConfig {
    type Error = ConfigError;

    fn try_from(options: &WriteOptions) -> Result<Self, Self::Error> {
        let operation = options.parsed_or(OPERATION, WriteOperation::Upsert)?;
        let precombine_field = options.non_blank(PRECOMBINE_FIELD);
        if operation == WriteOperation::Upsert && precombine_field.is_none() {
            return Err(ConfigError::MissingOption(PRECOMBINE_FIELD.to_string()));
        }

        Ok(WriteConfig {
            table_name: options.required(TABLE_NAME)?,
            table_type: options.parsed_or(TABLE_TYPE, TableType::CopyOnWrite)?,
            record_key_field: options.required(RECORD_KEY_FIELD)?,
            precombine_field,
            partition_field: options.non_blank(PARTITION_PATH_FIELD),
            operation,
            index_type: options.parsed_or(INDEX_TYPE, IndexType::Bloom)?,
            validators: validator_specs(options)?,
        })
    }
}

fn validator_specs(options: &WriteOptions) -> Result<Vec<ValidatorSpec>, ConfigError> {
    let Some(names) = options.non_blank(PRECOMMIT_VALIDATORS) else {
        return Ok(Vec::new());
    };

    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| validator_spec(options, name))
        .collect()
}

fn validator_spec(options: &WriteOptions, name: &str) -> Result<ValidatorSpec, ConfigError> {
    match name {
        SQL_EQUALITY_VALIDATOR => Ok(ValidatorSpec::SqlEquality(queries(
            options,
            EQUALITY_QUERIES,
        )?)),
        SQL_INEQUALITY_VALIDATOR => Ok(ValidatorSpec::SqlInequality(queries(
            options,
            INEQUALITY_QUERIES,
        )?)),
        SQL_SINGLE_RESULT_VALIDATOR => {
            let pairs = queries(options, SINGLE_RESULT_QUERIES)?
                .into_iter()
                .map(|entry| {
                    entry
                        .rsplit_once('#')
                        .map(|(query, expected)| {
                            (query.trim().to_string(), expected.trim().to_string())
                        })
                        .ok_or_else(|| ConfigError::InvalidValue {
                            key: SINGLE_RESULT_QUERIES.to_string(),
                            value: entry.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ValidatorSpec::SqlSingleResult(pairs))
        }
        unknown => Err(ConfigError::UnknownValidator(unknown.to_string())),
    }
}

/// `;`-separated queries; blank entries, such as the one after a trailing `;`, are dropped.
fn queries(options: &WriteOptions, key: &str) -> Result<Vec<String>, ConfigError> {
    let queries: Vec<String> = options
        .required(key)?
        .split(';')
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_string)
        .collect();

    if queries.is_empty() {
        return Err(ConfigError::MissingOption(key.to_string()));
    }
    Ok(queries)
}
