use crate::query::executor::error::ExecutionError;
use crate::query::executor::result_set::{ResultSet, RowViewResult};
use crate::query::plan::predicate::Predicate;
use crate::schema::Schema;

/// Rows of the inner result set that satisfy a predicate.
pub struct FilterResultSet {
    inner: Box<dyn ResultSet>,
    predicate: Predicate,
}

impl FilterResultSet {
    pub(crate) fn new(inner: Box<dyn ResultSet>, predicate: Predicate) -> Self {
        Self { inner, predicate }
    }
}

impl ResultSet for FilterResultSet {
    fn iterator(&self) -> Result<Box<dyn Iterator<Item = RowViewResult<'_>> + '_>, ExecutionError> {
        let inner_iterator = self.inner.iterator()?;
        let result = inner_iterator.filter_map(move |row_view_result| match row_view_result {
            Ok(row_view) => match self.predicate.matches(&row_view) {
                Ok(true) => Some(Ok(row_view)),
                Ok(false) => None,
                Err(err) => Some(Err(err)),
            },
            Err(error) => Some(Err(error)),
        });
        Ok(Box::new(result))
    }

    fn schema(&self) -> &Schema {
        self.inner.schema()
    }

    fn visible_column_names(&self) -> Vec<&str> {
        self.inner.visible_column_names()
    }
}
