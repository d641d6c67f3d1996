use crate::catalog::error::CatalogError;
use crate::storage::error::RowViewComparatorError;
use thiserror::Error;

/// Errors raised while running a plan over the catalog.
#[derive(Debug, PartialEq, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("type mismatch in comparison")]
    TypeMismatchInComparison,
}

impl From<RowViewComparatorError> for ExecutionError {
    fn from(error: RowViewComparatorError) -> Self {
        match error {
            RowViewComparatorError::UnknownColumn(column) => ExecutionError::UnknownColumn(column),
        }
    }
}
