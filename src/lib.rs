//! FMEA Worksheet Store
//!
//! Persistence backend for FMEA (Failure Mode and Effects Analysis)
//! worksheets: a header record plus an ordered set of failure-mode rows,
//! stored in SQLite and served as JSON over HTTP.

pub mod api;
pub mod cli;
pub mod core;
pub mod entities;
