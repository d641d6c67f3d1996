//! Assertion macros shared by unit tests.

/// Creates an ascending `OrderingKey`.
#[macro_export]
macro_rules! asc {
    ( $x:expr ) => {
        $crate::query::parser::ordering_key::OrderingKey::ascending_by($x)
    };
}

/// Creates a descending `OrderingKey`.
#[macro_export]
macro_rules! desc {
    ( $x:expr ) => {
        $crate::query::parser::ordering_key::OrderingKey::descending_by($x)
    };
}

/// Takes the next row from an iterator of `RowViewResult` and checks its columns.
///
/// `"column" => value` asserts the column holds `value`; `! "column"` asserts the column is
/// not visible in the row.
#[macro_export]
macro_rules! assert_next_row {
    ($iterator:expr $(, $($rest:tt)*)?) => {{
        let row_view = $iterator
            .next()
            .expect("expected another row")
            .expect("expected a row, found an error");
        $crate::assert_row_columns!(row_view $(, $($rest)*)?);
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! assert_row_columns {
    ($row_view:ident $(,)?) => {};
    ($row_view:ident, ! $column:literal $($rest:tt)*) => {
        assert!(
            $row_view.column_value_by($column).is_none(),
            "column '{}' should not be visible",
            $column
        );
        $crate::assert_row_columns!($row_view $($rest)*);
    };
    ($row_view:ident, $column:literal => $value:expr $(, $($rest:tt)*)?) => {
        assert_eq!(
            Some(&$crate::types::column_value::ColumnValue::from($value)),
            $row_view.column_value_by($column),
            "mismatch in column '{}'",
            $column
        );
        $crate::assert_row_columns!($row_view $(, $($rest)*)?);
    };
}

#[macro_export]
macro_rules! assert_no_more_rows {
    ($iterator:expr) => {
        assert!($iterator.next().is_none(), "expected no more rows");
    };
}
