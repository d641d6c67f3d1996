pub mod batch;
pub mod error;
pub mod row;
pub mod row_view;
pub(crate) mod table_store;
