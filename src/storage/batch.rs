use crate::display::{ShowOptions, TableFormatter};
use crate::schema::Schema;
use crate::storage::error::BatchError;
use crate::storage::row::Row;
use crate::types::column_type::ColumnType;
use crate::types::column_value::ColumnValue;
use std::sync::Arc;

/// An ordered, homogeneous collection of rows sharing one schema.
///
/// Every row is checked against the schema when the batch is built, so a `RecordBatch`
/// is always internally consistent. Batches are immutable: deriving a new column produces
/// a new batch and leaves the source untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBatch {
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

impl RecordBatch {
    /// Creates a new `RecordBatch` from a schema and rows.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::IncompatibleRow`] for the first row whose column count, types or
    /// nulls do not fit the schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use ingestor::schema::Schema;
    /// use ingestor::storage::batch::RecordBatch;
    /// use ingestor::types::column_type::ColumnType;
    /// use ingestor::rows;
    ///
    /// let schema = Schema::new()
    ///     .add_column("id", ColumnType::Int)
    ///     .unwrap()
    ///     .add_column("message", ColumnType::Text)
    ///     .unwrap();
    ///
    /// let batch = RecordBatch::try_new(schema, rows![[1, "A"], [2, "B"]]).unwrap();
    /// assert_eq!(2, batch.row_count());
    /// ```
    pub fn try_new(schema: Schema, rows: Vec<Row>) -> Result<Self, BatchError> {
        for (position, row) in rows.iter().enumerate() {
            schema
                .check_type_compatability(row.column_values())
                .map_err(|source| BatchError::IncompatibleRow {
                    row: position,
                    source,
                })?;
        }
        Ok(Self {
            schema: Arc::new(schema),
            rows,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the value of `column_name` in every row, in row order.
    pub fn column(&self, column_name: &str) -> Option<Vec<&ColumnValue>> {
        let position = self.schema.column_position(column_name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.column_value_at(position))
                .collect(),
        )
    }

    /// Derives a new batch with a non-nullable text column appended to every row.
    ///
    /// `generator` is called once per row, so each row receives its own value.
    pub fn with_generated_column<F>(
        &self,
        column_name: &str,
        mut generator: F,
    ) -> Result<RecordBatch, BatchError>
    where
        F: FnMut() -> String,
    {
        let schema = self
            .schema
            .as_ref()
            .clone()
            .add_non_nullable_column(column_name, ColumnType::Text)?;

        let rows = self
            .rows
            .iter()
            .map(|row| row.clone().add(ColumnValue::text(generator())))
            .collect();

        Ok(RecordBatch {
            schema: Arc::new(schema),
            rows,
        })
    }

    /// Renders the batch as a console table.
    pub fn show(&self, options: ShowOptions) -> String {
        TableFormatter::new(self.schema.column_names(), options)
            .render(self.rows.iter().map(|row| row.column_values().to_vec()))
    }
}
