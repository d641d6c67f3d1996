use crate::query::parser::ordering_key::{OrderingDirection, OrderingKey};
use crate::schema::Schema;
use crate::storage::error::RowViewComparatorError;
use crate::storage::row::Row;
use crate::types::column_value::ColumnValue;
use std::cmp::Ordering;

/// A read-only view over a single row, bound to a schema.
///
/// `RowView` provides **name-based access** to column values without exposing
/// internal storage details such as column positions or row layout.
///
/// It pairs:
/// - a concrete [`Row`] containing the actual values,
/// - a reference to the [`Schema`] used to resolve column names, and
/// - the positions visible after projection.
pub struct RowView<'a> {
    row: Row,
    schema: &'a Schema,
    visible_positions: &'a [usize],
}

impl<'a> RowView<'a> {
    pub(crate) fn new(row: Row, schema: &'a Schema, visible_positions: &'a [usize]) -> Self {
        Self {
            row,
            schema,
            visible_positions,
        }
    }

    /// Retrieves the value of a column by name.
    ///
    /// Returns `None` if the column is not part of the schema or has been projected away.
    /// Column name resolution ignores ASCII case.
    pub fn column_value_by(&self, column_name: &str) -> Option<&ColumnValue> {
        let position = self.schema.column_position(column_name)?;
        if self.visible_positions.contains(&position) {
            return self.row.column_value_at(position);
        }
        None
    }

    /// The visible values, in projection order.
    pub fn visible_values(&self) -> Vec<&ColumnValue> {
        self.visible_positions
            .iter()
            .filter_map(|position| self.row.column_value_at(*position))
            .collect()
    }

    /// The names of the visible columns, in projection order.
    pub fn visible_column_names(&self) -> Vec<&str> {
        self.visible_positions
            .iter()
            .filter_map(|position| self.schema.column_at(*position))
            .map(|column| column.name())
            .collect()
    }

    pub(crate) fn column_value_at_unchecked(&self, index: usize) -> &ColumnValue {
        //SAFETY: callers pass positions resolved against the same schema the row was checked with.
        self.row.column_value_at(index).unwrap()
    }

    /// Projects the row view to a new set of visible positions.
    pub(crate) fn project(self, visible_positions: &'a [usize]) -> Self {
        Self {
            row: self.row,
            schema: self.schema,
            visible_positions,
        }
    }
}

/// A comparator for [`RowView`]s that implements multi-column sorting logic.
///
/// It pre-calculates the positions of the sort columns in the schema to avoid repeated
/// lookups during comparison.
pub(crate) struct RowViewComparator<'a> {
    positions: Vec<usize>,
    ordering_keys: &'a [OrderingKey],
}

impl<'a> RowViewComparator<'a> {
    pub(crate) fn new(
        schema: &Schema,
        ordering_keys: &'a [OrderingKey],
    ) -> Result<Self, RowViewComparatorError> {
        let positions = ordering_keys
            .iter()
            .map(|key| {
                schema
                    .column_position(&key.column)
                    .ok_or_else(|| RowViewComparatorError::UnknownColumn(key.column.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            positions,
            ordering_keys,
        })
    }

    /// Compares two [`RowView`]s according to the configured ordering keys.
    ///
    /// The first non-equal key decides. Nulls sort first in ascending order.
    pub(crate) fn compare(&self, left: &RowView, right: &RowView) -> Ordering {
        for (column_position, key) in self.positions.iter().zip(self.ordering_keys.iter()) {
            let left_value = left.column_value_at_unchecked(*column_position);
            let right_value = right.column_value_at_unchecked(*column_position);

            let ordering = left_value
                .partial_compare(right_value)
                .unwrap_or(Ordering::Equal);

            if ordering != Ordering::Equal {
                return match key.direction {
                    OrderingDirection::Ascending => ordering,
                    OrderingDirection::Descending => ordering.reverse(),
                };
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::column_type::ColumnType;
    use crate::{row, schema};

    #[test]
    fn column_value() {
        let schema = schema!["id" => ColumnType::Int].unwrap();
        let visible_positions = vec![0];
        let view = RowView::new(row![200], &schema, &visible_positions);

        assert_eq!(&ColumnValue::int(200), view.column_value_by("id").unwrap());
    }

    #[test]
    fn attempt_to_get_non_existing_column() {
        let schema = schema!["id" => ColumnType::Int].unwrap();
        let visible_positions = vec![0];
        let view = RowView::new(row![200], &schema, &visible_positions);

        assert!(view.column_value_by("name").is_none());
    }

    #[test]
    fn attempt_to_get_a_column_not_in_visible_position() {
        let schema = schema!["id" => ColumnType::Int, "name" => ColumnType::Text].unwrap();
        let visible_positions = vec![1];
        let view = RowView::new(row![200, "ingestor"], &schema, &visible_positions);

        assert!(view.column_value_by("id").is_none());
        assert_eq!(
            &ColumnValue::text("ingestor"),
            view.column_value_by("name").unwrap()
        );
    }

    #[test]
    fn project_row_view() {
        let schema = schema!["id" => ColumnType::Int, "name" => ColumnType::Text].unwrap();
        let visible_positions = vec![0, 1];
        let view = RowView::new(row![200, "ingestor"], &schema, &visible_positions);

        let projection = vec![1];
        let projected_view = view.project(&projection);

        assert!(projected_view.column_value_by("id").is_none());
        assert_eq!(vec!["name"], projected_view.visible_column_names());
        assert_eq!(
            vec![&ColumnValue::text("ingestor")],
            projected_view.visible_values()
        );
    }
}
