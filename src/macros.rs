/// Creates a `Row` from a list of values.
///
/// This macro simplifies row creation by automatically converting
/// provided values into `ColumnValue`s using `From` implementations.
///
/// # Examples
///
/// ```
/// use ingestor::row;
/// use ingestor::storage::row::Row;
/// use ingestor::types::column_value::ColumnValue;
///
/// let row = row![1, "text", ColumnValue::Null];
/// let expected = Row::filled(vec![
///     ColumnValue::int(1),
///     ColumnValue::text("text"),
///     ColumnValue::Null,
/// ]);
/// assert_eq!(row, expected);
/// ```
#[macro_export]
macro_rules! row {
    ( $( $x:expr ),* $(,)? ) => {
        {
            use $crate::storage::row::Row;
            use $crate::types::column_value::ColumnValue;
            Row::filled(vec![
                $( ColumnValue::from($x) ),*
            ])
        }
    };
}

/// Creates a `Vec<Row>` from a list of row definitions.
///
/// # Examples
///
/// ```
/// use ingestor::rows;
///
/// let rows = rows![[1, "a"], [2, "b"]];
/// assert_eq!(2, rows.len());
/// ```
#[macro_export]
macro_rules! rows {
    ( $( [ $( $x:expr ),* ] ),* $(,)? ) => {
        vec![
            $(
                $crate::row![ $( $x ),* ]
            ),*
        ]
    };
}

/// Creates a `Result<Schema, SchemaError>` from `name => type` pairs. All columns are nullable.
///
/// # Examples
///
/// ```
/// use ingestor::schema;
/// use ingestor::types::column_type::ColumnType;
///
/// let schema = schema!["id" => ColumnType::Int, "message" => ColumnType::Text].unwrap();
/// assert_eq!(2, schema.column_count());
/// ```
#[macro_export]
macro_rules! schema {
    ( $( $name:expr => $column_type:expr ),* $(,)? ) => {
        {
            let schema: Result<$crate::schema::Schema, $crate::schema::error::SchemaError> =
                Ok($crate::schema::Schema::new());
            $(
                let schema = schema.and_then(|schema| schema.add_column($name, $column_type));
            )*
            schema
        }
    };
}
