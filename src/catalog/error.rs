use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum CatalogError {
    #[error("table already exists: {0}")]
    TableAlreadyExists(String),
    #[error("table does not exist: {0}")]
    TableDoesNotExist(String),
}
