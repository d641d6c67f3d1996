/// The output columns of a `SELECT` statement.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Projection {
    /// `*`
    All,
    Columns(Vec<String>),
    /// `COUNT(*)`, a single row with a single `count` column.
    CountAll,
}
