pub mod column;
pub mod error;

use crate::schema::column::Column;
use crate::schema::error::SchemaError;
use crate::types::column_type::ColumnType;
use crate::types::column_value::ColumnValue;
use serde::{Deserialize, Serialize};

/// An ordered list of named, typed columns.
///
/// Schemas are persisted with a table's config and compared on every write, so two schemas
/// are equal only if they have the same columns in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Adds a nullable column.
    pub fn add_column(self, name: &str, column_type: ColumnType) -> Result<Self, SchemaError> {
        self.add(name, column_type, true)
    }

    pub fn add_non_nullable_column(
        self,
        name: &str,
        column_type: ColumnType,
    ) -> Result<Self, SchemaError> {
        self.add(name, column_type, false)
    }

    /// Returns a new schema with `columns` placed ahead of the columns of this schema.
    pub(crate) fn with_leading_columns(&self, columns: Vec<Column>) -> Result<Self, SchemaError> {
        let mut schema = Schema { columns };
        for column in &self.columns {
            schema = schema.add(column.name(), column.column_type(), column.is_nullable())?;
        }
        Ok(schema)
    }

    pub fn column_position(&self, column_name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.matches_name(column_name))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name()).collect()
    }

    pub(crate) fn column_at(&self, position: usize) -> Option<&Column> {
        self.columns.get(position)
    }

    pub(crate) fn check_type_compatability(
        &self,
        values: &[ColumnValue],
    ) -> Result<(), SchemaError> {
        if values.len() != self.column_count() {
            return Err(SchemaError::ColumnCountMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }

        for (column, value) in self.columns.iter().zip(values) {
            if value.is_null() && !column.is_nullable() {
                return Err(SchemaError::NullInNonNullableColumn(
                    column.name().to_string(),
                ));
            }
            if !column.column_type().accepts(value) {
                return Err(SchemaError::ColumnTypeMismatch {
                    column: column.name().to_string(),
                    expected: column.column_type(),
                    //SAFETY: `accepts` admits every null, so a rejected value always has a type.
                    actual: value.column_type().unwrap(),
                });
            }
        }
        Ok(())
    }

    fn add(
        mut self,
        name: &str,
        column_type: ColumnType,
        nullable: bool,
    ) -> Result<Self, SchemaError> {
        self.ensure_column_not_already_defined(name)?;

        self.columns.push(Column::new(name, column_type, nullable));
        Ok(self)
    }

    fn ensure_column_not_already_defined(&self, name: &str) -> Result<(), SchemaError> {
        if self.has_column(name) {
            return Err(SchemaError::DuplicateColumnName(name.to_string()));
        }
        Ok(())
    }

    fn has_column(&self, column_name: &str) -> bool {
        self.columns
            .iter()
            .any(|column| column.matches_name(column_name))
    }
}
