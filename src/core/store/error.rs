//! Store error types

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the worksheet store
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("No FMEA worksheet with id {id}")]
    #[diagnostic(code(fmea::store::not_found))]
    NotFound { id: i64 },

    #[error("No FMEA worksheet has been saved yet")]
    #[diagnostic(code(fmea::store::empty))]
    Empty,

    #[error("Database schema version {found} does not match expected version {expected}")]
    #[diagnostic(
        code(fmea::store::schema_mismatch),
        help("there are no migrations; move the old database aside and let the store recreate it")
    )]
    SchemaMismatch { found: i32, expected: i32 },

    #[error("Database has worksheet tables but no schema version")]
    #[diagnostic(
        code(fmea::store::unversioned),
        help("the tables were not created by this store; move the database aside and let the store recreate it")
    )]
    Unversioned,

    #[error("Store connection lock was poisoned by a panicked request")]
    #[diagnostic(code(fmea::store::poisoned))]
    Poisoned,

    #[error("SQLite error: {0}")]
    #[diagnostic(code(fmea::store::sqlite))]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(fmea::store::io))]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True for the "nothing matched" conditions (unknown id, empty store)
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. } | StoreError::Empty)
    }
}
