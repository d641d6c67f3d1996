use crate::query::executor::error::ExecutionError;
use crate::query::executor::result_set::{ResultSet, RowViewResult};
use crate::schema::Schema;
use crate::storage::row::Row;
use crate::storage::row_view::RowView;
use crate::types::column_type::ColumnType;
use crate::types::column_value::ColumnValue;

pub(crate) const COUNT_COLUMN: &str = "count";

/// A single row holding the number of rows in the inner result set.
pub struct CountResultSet {
    inner: Box<dyn ResultSet>,
    schema: Schema,
    visible_positions: Vec<usize>,
}

impl CountResultSet {
    pub(crate) fn new(inner: Box<dyn ResultSet>) -> Self {
        //SAFETY: a single column can never clash with another.
        let schema = Schema::new()
            .add_non_nullable_column(COUNT_COLUMN, ColumnType::Int)
            .unwrap();
        Self {
            inner,
            schema,
            visible_positions: vec![0],
        }
    }
}

impl ResultSet for CountResultSet {
    fn iterator(&self) -> Result<Box<dyn Iterator<Item = RowViewResult<'_>> + '_>, ExecutionError> {
        let mut count: i64 = 0;
        for row_view in self.inner.iterator()? {
            row_view?;
            count += 1;
        }
        let row = Row::filled(vec![ColumnValue::int(count)]);
        Ok(Box::new(std::iter::once(Ok(RowView::new(
            row,
            &self.schema,
            &self.visible_positions,
        )))))
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::executor::test_utils::{error_result_set, scan_of};
    use crate::{assert_next_row, assert_no_more_rows, rows, schema};

    #[test]
    fn count_rows() {
        let scan = scan_of(schema!["uuid" => ColumnType::Int].unwrap(), rows![[1], [2]]);
        let count = CountResultSet::new(scan);
        let mut iterator = count.iterator().unwrap();

        assert_next_row!(iterator.as_mut(), "count" => 2);
        assert_no_more_rows!(iterator.as_mut());
    }

    #[test]
    fn count_of_empty_result_set_is_zero() {
        let scan = scan_of(schema!["uuid" => ColumnType::Int].unwrap(), vec![]);
        let count = CountResultSet::new(scan);
        let mut iterator = count.iterator().unwrap();

        assert_next_row!(iterator.as_mut(), "count" => 0);
        assert_eq!(vec!["count"], count.visible_column_names());
    }

    #[test]
    fn count_propagates_inner_errors() {
        let count = CountResultSet::new(error_result_set());

        assert!(matches!(
            count.iterator(),
            Err(ExecutionError::TypeMismatchInComparison)
        ));
    }
}
