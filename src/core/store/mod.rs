//! SQLite-backed worksheet store
//!
//! Two tables hold the data:
//! - `fmea_header`: one record per saved worksheet
//! - `fmea_row`: failure-mode rows, each owned by exactly one header
//!
//! A save writes the header and all of its rows in one transaction.
//! Identifiers come from `AUTOINCREMENT` and are never reused.
//! There is no migration tooling: a database written with another schema
//! version is refused and must be recreated.

mod error;
mod queries;
mod schema;

pub use error::StoreError;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::entities::worksheet::{Worksheet, WorksheetHeader, WorksheetRow, WorksheetSummary};

/// Current schema version - a mismatch refuses to open the database
pub const SCHEMA_VERSION: i32 = 1;

/// Table cardinalities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub headers: usize,
    pub rows: usize,
}

/// The operations the API layer is allowed to perform on stored worksheets
pub trait WorksheetStore: Send + Sync {
    /// Persist a header and its rows atomically, returning the new header id
    fn create(&self, header: &WorksheetHeader, rows: &[WorksheetRow]) -> Result<i64, StoreError>;

    /// Summaries of every saved worksheet, newest first
    fn list(&self) -> Result<Vec<WorksheetSummary>, StoreError>;

    /// Fetch one worksheet with its rows in submission order
    fn get_by_id(&self, id: i64) -> Result<Worksheet, StoreError>;

    /// Fetch the worksheet with the highest id
    fn get_latest(&self) -> Result<Worksheet, StoreError>;
}

/// The worksheet store backed by SQLite
pub struct SqliteWorksheetStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteWorksheetStore {
    /// Open or create the database file at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        log::debug!("Opened worksheet store at {}", path.display());
        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory store (tests and dry runs)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        // SQLite leaves foreign key enforcement off unless asked per connection
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::prepare(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file location (`None` for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Schema version recorded in the database
    pub fn schema_version(&self) -> Result<Option<i32>, StoreError> {
        let conn = self.lock()?;
        schema::stored_version(&conn)
    }

    /// Flush and close the underlying connection
    pub fn close(self) -> Result<(), StoreError> {
        let conn = self.conn.into_inner().map_err(|_| StoreError::Poisoned)?;
        conn.close().map_err(|(_, err)| StoreError::Sqlite(err))?;
        log::debug!("Worksheet store closed");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}
