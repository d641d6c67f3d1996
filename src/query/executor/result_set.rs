use crate::query::executor::error::ExecutionError;
use crate::schema::Schema;
use crate::storage::row_view::RowView;

/// A re-iterable source of rows.
///
/// A `ResultSet` owns (or shares) its data and hands out iterators that borrow from it, so the
/// same result can be iterated more than once, e.g. once to display it and once to count it.
pub trait ResultSet {
    fn iterator(&self) -> Result<Box<dyn Iterator<Item = RowViewResult<'_>> + '_>, ExecutionError>;

    /// The schema column positions in each [`RowView`] refer to.
    fn schema(&self) -> &Schema;

    /// Names of the columns each row exposes, in output order.
    fn visible_column_names(&self) -> Vec<&str> {
        self.schema().column_names()
    }
}

pub type RowViewResult<'a> = Result<RowView<'a>, ExecutionError>;
