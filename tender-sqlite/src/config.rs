//! Configuration for the SQLite database connection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings controlling how the database is opened.
///
/// The default configuration (no path) opens an in-memory database, which is
/// what the test suite uses; deployments point `database_path` at a file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// Database file path. If `None`, an in-memory database is used
    pub database_path: Option<PathBuf>,

    /// Whether to create the database file if it doesn't exist
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
        }
    }
}
