use crate::display::ShowOptions;
use std::path::PathBuf;

const DEFAULT_APP_NAME: &str = "ingestor";
const DEFAULT_WAREHOUSE_DIRECTORY: &str = "ingestor";

/// Settings a [`Session`](crate::session::Session) is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Root directory holding one directory per database.
    pub warehouse: PathBuf,
    /// Name the session reports itself under in logs.
    pub app_name: String,
    /// Rows shown when a table is rendered.
    pub show_rows: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            warehouse: std::env::temp_dir().join(DEFAULT_WAREHOUSE_DIRECTORY),
            app_name: DEFAULT_APP_NAME.to_string(),
            show_rows: ShowOptions::default().num_rows,
        }
    }
}

impl SessionConfig {
    pub fn with_warehouse<P: Into<PathBuf>>(mut self, warehouse: P) -> Self {
        self.warehouse = warehouse.into();
        self
    }

    pub fn with_app_name(mut self, app_name: &str) -> Self {
        self.app_name = app_name.to_string();
        self
    }

    pub fn with_show_rows(mut self, show_rows: usize) -> Self {
        self.show_rows = show_rows;
        self
    }
}
