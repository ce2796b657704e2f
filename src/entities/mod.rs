//! Entity types

pub mod worksheet;

pub use worksheet::{
    RiskLevel, StoredRow, Worksheet, WorksheetDocument, WorksheetHeader, WorksheetRow,
    WorksheetSummary,
};
