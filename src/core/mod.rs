//! Core module - configuration and worksheet storage

pub mod config;
pub mod store;

pub use config::Config;
pub use store::{SqliteWorksheetStore, StoreCounts, StoreError, WorksheetStore, SCHEMA_VERSION};
