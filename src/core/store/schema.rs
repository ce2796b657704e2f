//! Database schema initialization

use rusqlite::{params, Connection, OptionalExtension};

use super::{StoreError, SCHEMA_VERSION};

/// Create tables on a fresh database, or verify the version of an existing one
pub(super) fn prepare(conn: &Connection) -> Result<(), StoreError> {
    match stored_version(conn)? {
        None if has_worksheet_tables(conn)? => Err(StoreError::Unversioned),
        None => init_schema(conn),
        Some(found) if found != SCHEMA_VERSION => Err(StoreError::SchemaMismatch {
            found,
            expected: SCHEMA_VERSION,
        }),
        Some(_) => Ok(()),
    }
}

/// Read the recorded schema version, `None` when the database is blank
pub(super) fn stored_version(conn: &Connection) -> Result<Option<i32>, StoreError> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(None);
    }

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(version)
}

/// Worksheet tables left by something other than this store
fn has_worksheet_tables(conn: &Connection) -> Result<bool, StoreError> {
    let found: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name IN ('fmea_header', 'fmea_row'))",
        [],
        |row| row.get(0),
    )?;
    Ok(found)
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    log::debug!("Creating worksheet schema v{}", SCHEMA_VERSION);

    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );

        -- Worksheet headers (one per saved analysis)
        CREATE TABLE IF NOT EXISTS fmea_header (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            company TEXT,
            product_name TEXT,
            product_number TEXT,
            model_year TEXT,
            team TEXT,
            prepared_by TEXT,
            date_prepared TEXT,
            approved_by TEXT,
            date_approved TEXT,
            revision TEXT,
            page TEXT,
            fmea_type TEXT,
            fmea_number TEXT
        );

        -- Failure-mode rows, owned by exactly one header
        CREATE TABLE IF NOT EXISTS fmea_row (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            header_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            item TEXT,
            failure_mode TEXT,
            effects_of_failure TEXT,
            severity INTEGER,
            classification TEXT,
            causes_of_failure TEXT,
            occurrence INTEGER,
            current_controls_prevention TEXT,
            current_controls_detection TEXT,
            detection INTEGER,
            rpn INTEGER,
            recommended_actions TEXT,
            responsibility TEXT,
            target_date TEXT,
            actions_taken TEXT,
            completion_date TEXT,
            new_severity INTEGER,
            new_occurrence INTEGER,
            new_detection INTEGER,
            new_rpn INTEGER,
            FOREIGN KEY (header_id) REFERENCES fmea_header(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_fmea_row_header ON fmea_row(header_id, position);
        "#,
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
        params![SCHEMA_VERSION],
    )?;

    Ok(())
}
