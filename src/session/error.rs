use crate::query::QueryError;
use crate::table::error::TableError;
use thiserror::Error;

/// Errors raised by [`Session`](crate::session::Session) reads and queries.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The table could not be loaded.
    #[error(transparent)]
    Table(#[from] TableError),
    /// The query could not be lexed, parsed, planned or executed.
    #[error(transparent)]
    Query(#[from] QueryError),
}
