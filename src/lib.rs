pub mod catalog;
pub mod display;
pub mod ingest;
pub mod macros;
pub mod query;
pub mod reader;
pub mod schema;
pub mod session;
pub mod storage;
pub mod table;
#[cfg(test)]
mod test_utils;
pub mod types;
