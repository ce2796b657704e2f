//! Worksheet reads and writes

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{SqliteWorksheetStore, StoreCounts, StoreError, WorksheetStore};
use crate::entities::worksheet::{
    StoredRow, Worksheet, WorksheetHeader, WorksheetRow, WorksheetSummary,
};

const INSERT_HEADER: &str = r#"
    INSERT INTO fmea_header (
        company, product_name, product_number, model_year, team, prepared_by,
        date_prepared, approved_by, date_approved, revision, page, fmea_type,
        fmea_number
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"#;

const INSERT_ROW: &str = r#"
    INSERT INTO fmea_row (
        header_id, position, item, failure_mode, effects_of_failure, severity,
        classification, causes_of_failure, occurrence, current_controls_prevention,
        current_controls_detection, detection, rpn, recommended_actions,
        responsibility, target_date, actions_taken, completion_date,
        new_severity, new_occurrence, new_detection, new_rpn
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
              ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)"#;

const SELECT_HEADER: &str = r#"
    SELECT company, product_name, product_number, model_year, team, prepared_by,
           date_prepared, approved_by, date_approved, revision, page, fmea_type,
           fmea_number
    FROM fmea_header WHERE id = ?1"#;

// Submission order lives in `position`; `id` only breaks ties
const SELECT_ROWS: &str = r#"
    SELECT id, item, failure_mode, effects_of_failure, severity, classification,
           causes_of_failure, occurrence, current_controls_prevention,
           current_controls_detection, detection, rpn, recommended_actions,
           responsibility, target_date, actions_taken, completion_date,
           new_severity, new_occurrence, new_detection, new_rpn
    FROM fmea_row WHERE header_id = ?1
    ORDER BY position, id"#;

impl WorksheetStore for SqliteWorksheetStore {
    fn create(&self, header: &WorksheetHeader, rows: &[WorksheetRow]) -> Result<i64, StoreError> {
        let mut conn = self.lock()?;
        // Dropping the transaction without commit rolls everything back
        let tx = conn.transaction()?;

        tx.execute(
            INSERT_HEADER,
            params![
                header.company,
                header.product_name,
                header.product_number,
                header.model_year,
                header.team,
                header.prepared_by,
                header.date_prepared,
                header.approved_by,
                header.date_approved,
                header.revision,
                header.page,
                header.fmea_type,
                header.fmea_number,
            ],
        )?;
        let header_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(INSERT_ROW)?;
            for (position, row) in rows.iter().enumerate() {
                stmt.execute(params![
                    header_id,
                    position as i64,
                    row.item,
                    row.failure_mode,
                    row.effects_of_failure,
                    row.severity,
                    row.classification,
                    row.causes_of_failure,
                    row.occurrence,
                    row.current_controls_prevention,
                    row.current_controls_detection,
                    row.detection,
                    row.rpn,
                    row.recommended_actions,
                    row.responsibility,
                    row.target_date,
                    row.actions_taken,
                    row.completion_date,
                    row.new_severity,
                    row.new_occurrence,
                    row.new_detection,
                    row.new_rpn,
                ])?;
            }
        }

        tx.commit()?;
        Ok(header_id)
    }

    fn list(&self) -> Result<Vec<WorksheetSummary>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, product_name, fmea_number, date_prepared FROM fmea_header ORDER BY id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(WorksheetSummary {
                id: row.get(0)?,
                product_name: row.get(1)?,
                fmea_number: row.get(2)?,
                date_prepared: row.get(3)?,
            })
        })?;

        let summaries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }

    fn get_by_id(&self, id: i64) -> Result<Worksheet, StoreError> {
        let conn = self.lock()?;
        load_worksheet(&conn, id)
    }

    fn get_latest(&self) -> Result<Worksheet, StoreError> {
        let conn = self.lock()?;
        let latest: Option<i64> =
            conn.query_row("SELECT MAX(id) FROM fmea_header", [], |row| row.get(0))?;

        match latest {
            Some(id) => load_worksheet(&conn, id),
            None => Err(StoreError::Empty),
        }
    }
}

impl SqliteWorksheetStore {
    /// Delete a worksheet and every row it owns
    ///
    /// Rows are removed by header reference first, then the header, inside
    /// one transaction. Returns the number of rows removed.
    pub fn delete(&self, id: i64) -> Result<usize, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM fmea_header WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StoreError::NotFound { id });
        }

        let rows_removed = tx.execute("DELETE FROM fmea_row WHERE header_id = ?1", params![id])?;
        tx.execute("DELETE FROM fmea_header WHERE id = ?1", params![id])?;
        tx.commit()?;

        log::debug!("Deleted worksheet {} ({} rows)", id, rows_removed);
        Ok(rows_removed)
    }

    /// Count stored headers and rows
    pub fn counts(&self) -> Result<StoreCounts, StoreError> {
        let conn = self.lock()?;
        let headers: i64 = conn.query_row("SELECT COUNT(*) FROM fmea_header", [], |row| row.get(0))?;
        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM fmea_row", [], |row| row.get(0))?;

        Ok(StoreCounts {
            headers: headers as usize,
            rows: rows as usize,
        })
    }
}

fn load_worksheet(conn: &Connection, id: i64) -> Result<Worksheet, StoreError> {
    let header = conn
        .query_row(SELECT_HEADER, params![id], map_header)
        .optional()?
        .ok_or(StoreError::NotFound { id })?;

    let mut stmt = conn.prepare(SELECT_ROWS)?;
    let rows = stmt
        .query_map(params![id], map_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Worksheet { id, header, rows })
}

fn map_header(row: &Row<'_>) -> rusqlite::Result<WorksheetHeader> {
    Ok(WorksheetHeader {
        company: row.get(0)?,
        product_name: row.get(1)?,
        product_number: row.get(2)?,
        model_year: row.get(3)?,
        team: row.get(4)?,
        prepared_by: row.get(5)?,
        date_prepared: row.get(6)?,
        approved_by: row.get(7)?,
        date_approved: row.get(8)?,
        revision: row.get(9)?,
        page: row.get(10)?,
        fmea_type: row.get(11)?,
        fmea_number: row.get(12)?,
    })
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<StoredRow> {
    Ok(StoredRow {
        id: row.get(0)?,
        row: WorksheetRow {
            item: row.get(1)?,
            failure_mode: row.get(2)?,
            effects_of_failure: row.get(3)?,
            severity: row.get(4)?,
            classification: row.get(5)?,
            causes_of_failure: row.get(6)?,
            occurrence: row.get(7)?,
            current_controls_prevention: row.get(8)?,
            current_controls_detection: row.get(9)?,
            detection: row.get(10)?,
            rpn: row.get(11)?,
            recommended_actions: row.get(12)?,
            responsibility: row.get(13)?,
            target_date: row.get(14)?,
            actions_taken: row.get(15)?,
            completion_date: row.get(16)?,
            new_severity: row.get(17)?,
            new_occurrence: row.get(18)?,
            new_detection: row.get(19)?,
            new_rpn: row.get(20)?,
        },
    })
}
