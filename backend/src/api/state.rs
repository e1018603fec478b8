//! Shared, read-only state handed to every request handler.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::logs::{log_error, log_warning};
use crate::loader::try_load;
use crate::models::Table;

/// The loaded table plus where it came from.
///
/// Built once at startup and never mutated, so handlers share it through an
/// `Arc` without locking.
#[derive(Debug, Clone)]
pub struct AppState {
    pub table: Arc<Table>,
    pub data_path: Option<PathBuf>,
    pub load_error: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    /// Load the dataset at `path`. A failed load yields an empty table and
    /// keeps the error for `/health`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let (table, load_error) = match try_load(path) {
            Ok(table) => {
                if table.is_empty() {
                    log_warning(format!("{} has no listings", path.display()));
                }
                (table, None)
            }
            Err(e) => {
                log_error(format!("Error loading data: {}", e));
                (Table::empty(), Some(e.to_string()))
            }
        };

        Self {
            table: Arc::new(table),
            data_path: Some(path.to_path_buf()),
            load_error,
            loaded_at: Utc::now(),
        }
    }

    /// State over an in-memory table.
    pub fn from_table(table: Table) -> Self {
        Self {
            table: Arc::new(table),
            data_path: None,
            load_error: None,
            loaded_at: Utc::now(),
        }
    }
}
