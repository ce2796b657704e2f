//! Integration tests for the fmea-store CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.
//! Worksheets are seeded through the library so the binary only reads them.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use fmea_store::core::{SqliteWorksheetStore, WorksheetStore};
use fmea_store::entities::worksheet::{WorksheetHeader, WorksheetRow};
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get an fmea-store command isolated from the caller's environment
fn fmea() -> Command {
    let mut cmd = Command::cargo_bin("fmea-store").unwrap();
    cmd.env_remove("FMEA_DATABASE")
        .env_remove("FMEA_BIND")
        .env_remove("FMEA_ALLOWED_ORIGINS");
    cmd
}

/// Helper to get the database path inside a temp directory
fn db_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("fmea.db")
}

/// Helper to save a worksheet into the temp database, returning its id
fn seed_worksheet(tmp: &TempDir, product: &str, rows: &[(&str, i64, i64, i64, i64)]) -> i64 {
    let store = SqliteWorksheetStore::open(&db_path(tmp)).unwrap();
    let header = WorksheetHeader {
        company: Some("Acme".to_string()),
        product_name: Some(product.to_string()),
        fmea_number: Some(format!("F-{}", product)),
        ..Default::default()
    };
    let rows: Vec<WorksheetRow> = rows
        .iter()
        .map(|&(item, s, o, d, rpn)| WorksheetRow {
            item: Some(item.to_string()),
            severity: Some(s),
            occurrence: Some(o),
            detection: Some(d),
            rpn: Some(rpn),
            ..Default::default()
        })
        .collect();
    let id = store.create(&header, &rows).unwrap();
    store.close().unwrap();
    id
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help_displays() {
    fmea()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("FMEA"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_displays() {
    fmea()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fmea-store"));
}

#[test]
fn test_unknown_command_fails() {
    fmea()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// List / Status
// ============================================================================

#[test]
fn test_list_empty_database_as_json() {
    let tmp = TempDir::new().unwrap();

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["list", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));

    // Opening the store creates the file
    assert!(db_path(&tmp).exists());
}

#[test]
fn test_list_newest_first() {
    let tmp = TempDir::new().unwrap();
    let first = seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 84)]);
    let second = seed_worksheet(&tmp, "Valve", &[("Stem", 5, 2, 2, 20)]);

    let output = fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["list", "-f", "tsv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<&str> = stdout
        .lines()
        .skip(1)
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(ids, vec![second.to_string(), first.to_string()]);
    assert!(stdout.contains("Valve"));
}

#[test]
fn test_list_csv_has_header_line() {
    let tmp = TempDir::new().unwrap();
    seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 84)]);

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["list", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID,Product,FMEA No.,Prepared"))
        .stdout(predicate::str::contains("Pump"));
}

#[test]
fn test_status_reports_counts() {
    let tmp = TempDir::new().unwrap();
    seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 84), ("Shaft", 6, 2, 4, 48)]);

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Worksheets:"))
        .stdout(predicate::str::contains("Rows:"))
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_database_from_environment() {
    let tmp = TempDir::new().unwrap();
    seed_worksheet(&tmp, "FromEnv", &[("Seal", 7, 4, 3, 84)]);

    fmea()
        .env("FMEA_DATABASE", db_path(&tmp))
        .args(["list", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FromEnv"));
}

#[test]
fn test_database_flag_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    seed_worksheet(&tmp, "Flagged", &[("Seal", 7, 4, 3, 84)]);
    let config = tmp.path().join("config.yaml");
    fs::write(&config, "database: /nonexistent/dir/never.db\n").unwrap();

    fmea()
        .arg("--config")
        .arg(&config)
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["list", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flagged"));
}

#[test]
fn test_malformed_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    fs::write(&config, "database: [unclosed\n").unwrap();

    fmea()
        .arg("--config")
        .arg(&config)
        .arg("--database")
        .arg(db_path(&tmp))
        .arg("list")
        .assert()
        .failure();
}

// ============================================================================
// Show / Export
// ============================================================================

#[test]
fn test_show_latest_json_matches_api_document() {
    let tmp = TempDir::new().unwrap();
    seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 84)]);
    seed_worksheet(&tmp, "Valve", &[("Stem", 8, 3, 5, 120)]);

    let output = fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["show", "latest", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["headerData"]["productName"], "Valve");
    assert_eq!(doc["rows"][0]["severity"], 8);
    assert!(doc["rows"][0]["id"].is_string());
}

#[test]
fn test_show_by_id_renders_rows() {
    let tmp = TempDir::new().unwrap();
    let id = seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 84)]);

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["show", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("Seal"));
}

#[test]
fn test_show_on_empty_database_fails() {
    let tmp = TempDir::new().unwrap();

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No FMEA worksheet has been saved yet"));
}

#[test]
fn test_show_rejects_bad_selector() {
    let tmp = TempDir::new().unwrap();

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["show", "newest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a worksheet id or 'latest'"));
}

#[test]
fn test_export_csv_to_file() {
    let tmp = TempDir::new().unwrap();
    let id = seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 84), ("Shaft", 6, 2, 4, 48)]);
    let out = tmp.path().join("pump.csv");

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["export", &id.to_string(), "-o"])
        .arg(&out)
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,item,failureMode"));
    assert!(lines[1].contains("Seal"));
    assert!(lines[2].contains("Shaft"));
}

#[test]
fn test_export_warns_on_stale_rpn() {
    let tmp = TempDir::new().unwrap();
    // 7 × 4 × 3 = 84, stored as 99
    seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 99)]);

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("99"))
        .stderr(predicate::str::contains("1 row(s)"));
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn test_delete_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["delete", "42", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No FMEA worksheet with id 42"));
}

#[test]
fn test_delete_with_yes_removes_worksheet() {
    let tmp = TempDir::new().unwrap();
    let keep = seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 84)]);
    let gone = seed_worksheet(&tmp, "Valve", &[("Stem", 5, 2, 2, 20), ("Body", 4, 2, 2, 16)]);

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["delete", &gone.to_string(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 row(s)"));

    let store = SqliteWorksheetStore::open(&db_path(&tmp)).unwrap();
    assert!(store.get_by_id(gone).unwrap_err().is_not_found());
    assert_eq!(store.get_latest().unwrap().id, keep);
    assert_eq!(store.counts().unwrap().rows, 1);
}

#[test]
fn test_delete_without_terminal_requires_yes() {
    let tmp = TempDir::new().unwrap();
    let id = seed_worksheet(&tmp, "Pump", &[("Seal", 7, 4, 3, 84)]);

    fmea()
        .arg("--database")
        .arg(db_path(&tmp))
        .args(["delete", &id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    let store = SqliteWorksheetStore::open(&db_path(&tmp)).unwrap();
    assert!(store.get_by_id(id).is_ok());
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    fmea()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fmea-store"));
}
