use crate::query::executor::error::ExecutionError;
use crate::query::executor::result_set::{ResultSet, RowViewResult};
use crate::schema::Schema;

/// At most `limit` rows of the inner result set.
pub struct LimitResultSet {
    inner: Box<dyn ResultSet>,
    limit: usize,
}

impl LimitResultSet {
    pub(crate) fn new(inner: Box<dyn ResultSet>, limit: usize) -> Self {
        Self { inner, limit }
    }
}

impl ResultSet for LimitResultSet {
    fn iterator(&self) -> Result<Box<dyn Iterator<Item = RowViewResult<'_>> + '_>, ExecutionError> {
        let inner_iterator = self.inner.iterator()?;
        Ok(Box::new(inner_iterator.take(self.limit)))
    }

    fn schema(&self) -> &Schema {
        self.inner.schema()
    }

    fn visible_column_names(&self) -> Vec<&str> {
        self.inner.visible_column_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::executor::test_utils::{init_error_result_set, scan_of};
    use crate::types::column_type::ColumnType;
    use crate::{assert_next_row, assert_no_more_rows, rows, schema};

    #[test]
    fn limit_rows() {
        let scan = scan_of(schema!["uuid" => ColumnType::Int].unwrap(), rows![[1], [2], [3]]);
        let limit = LimitResultSet::new(scan, 2);
        let mut iterator = limit.iterator().unwrap();

        assert_next_row!(iterator.as_mut(), "uuid" => 1);
        assert_next_row!(iterator.as_mut(), "uuid" => 2);
        assert_no_more_rows!(iterator.as_mut());
    }

    #[test]
    fn limit_larger_than_row_count() {
        let scan = scan_of(schema!["uuid" => ColumnType::Int].unwrap(), rows![[1]]);
        let limit = LimitResultSet::new(scan, 10);

        assert_eq!(1, limit.iterator().unwrap().count());
    }

    #[test]
    fn limit_propagates_iterator_creation_error() {
        let limit = LimitResultSet::new(init_error_result_set(), 1);

        assert!(matches!(
            limit.iterator(),
            Err(ExecutionError::TypeMismatchInComparison)
        ));
    }
}
