use crate::query::executor::error::ExecutionError;
use crate::query::executor::result_set::{ResultSet, RowViewResult};
use crate::query::parser::ordering_key::OrderingKey;
use crate::schema::Schema;
use crate::storage::row_view::RowViewComparator;

/// Rows of the inner result set, sorted in memory by the ordering keys.
///
/// The sort is stable, so rows that compare equal keep their inner order. Every inner row is
/// buffered before the first one is yielded.
pub struct OrderingResultSet {
    inner: Box<dyn ResultSet>,
    ordering_keys: Vec<OrderingKey>,
}

impl OrderingResultSet {
    pub(crate) fn new(inner: Box<dyn ResultSet>, ordering_keys: Vec<OrderingKey>) -> Self {
        Self {
            inner,
            ordering_keys,
        }
    }
}

impl ResultSet for OrderingResultSet {
    fn iterator(&self) -> Result<Box<dyn Iterator<Item = RowViewResult<'_>> + '_>, ExecutionError> {
        let comparator = RowViewComparator::new(self.schema(), &self.ordering_keys)?;
        let mut row_views = self.inner.iterator()?.collect::<Result<Vec<_>, _>>()?;

        row_views.sort_by(|left, right| comparator.compare(left, right));
        Ok(Box::new(row_views.into_iter().map(Ok)))
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
    use crate::query::executor::test_utils::{error_result_set, scan_of};
    use crate::types::column_type::ColumnType;
    use crate::types::column_value::ColumnValue;
    use crate::{asc, assert_next_row, assert_no_more_rows, desc, row, rows, schema};

    #[test]
    fn order_descending() {
        let scan = scan_of(schema!["uuid" => ColumnType::Int].unwrap(), rows![[1], [3], [2]]);
        let ordering = OrderingResultSet::new(scan, vec![desc!("uuid")]);
        let mut iterator = ordering.iterator().unwrap();

        assert_next_row!(iterator.as_mut(), "uuid" => 3);
        assert_next_row!(iterator.as_mut(), "uuid" => 2);
        assert_next_row!(iterator.as_mut(), "uuid" => 1);
        assert_no_more_rows!(iterator.as_mut());
    }

    #[test]
    fn order_puts_nulls_first_and_keeps_ties_stable() {
        let scan = scan_of(
            schema!["uuid" => ColumnType::Int, "partition" => ColumnType::Text].unwrap(),
            vec![row![1, "2"], row![2, ColumnValue::Null], row![3, "1"], row![4, "1"]],
        );
        let ordering = OrderingResultSet::new(scan, vec![asc!("partition")]);
        let mut iterator = ordering.iterator().unwrap();

        assert_next_row!(iterator.as_mut(), "uuid" => 2);
        assert_next_row!(iterator.as_mut(), "uuid" => 3);
        assert_next_row!(iterator.as_mut(), "uuid" => 4);
        assert_next_row!(iterator.as_mut(), "uuid" => 1);
        assert_no_more_rows!(iterator.as_mut());
    }

    #[test]
    fn attempt_to_order_by_unknown_column() {
        let scan = scan_of(schema!["uuid" => ColumnType::Int].unwrap(), rows![[1]]);
        let ordering = OrderingResultSet::new(scan, vec![asc!("precomb")]);

        assert!(matches!(
            ordering.iterator(),
            Err(ExecutionError::UnknownColumn(column)) if column == "precomb"
        ));
    }

    #[test]
    fn ordering_propagates_inner_errors() {
        let ordering = OrderingResultSet::new(error_result_set(), vec![asc!("uuid")]);

        assert!(matches!(
            ordering.iterator(),
            Err(ExecutionError::TypeMismatchInComparison)
        ));
    }
}
