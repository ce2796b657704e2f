//! `fmea-store export` command - write a worksheet for spreadsheets or other tools
//!
//! CSV output has one line per row with every column of the worksheet grid;
//! `--format json` writes the same document the API returns.

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use super::show::stale_rows;
use super::{load_config, open_store, write_output, WorksheetSelector};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::worksheet::Worksheet;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Worksheet id, or `latest`
    #[arg(default_value = "latest")]
    pub worksheet: WorksheetSelector,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

const CSV_COLUMNS: [&str; 22] = [
    "id",
    "item",
    "failureMode",
    "effectsOfFailure",
    "severity",
    "classification",
    "causesOfFailure",
    "occurrence",
    "currentControlsPrevention",
    "currentControlsDetection",
    "detection",
    "rpn",
    "recommendedActions",
    "responsibility",
    "targetDate",
    "actionsTaken",
    "completionDate",
    "newSeverity",
    "newOccurrence",
    "newDetection",
    "newRpn",
    "riskLevel",
];

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, None)?;
    let store = open_store(&config)?;
    let worksheet = args.worksheet.load(&store)?;

    let content = match global.format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&worksheet.document()).into_diagnostic()?;
            json.push('\n');
            json
        }
        _ => to_csv(&worksheet)?,
    };

    let stale = stale_rows(&worksheet).len();
    if stale > 0 {
        eprintln!(
            "{} {} row(s) carry an RPN that differs from S×O×D; exported as stored",
            style("!").yellow(),
            stale
        );
    }

    write_output(&content, args.output)
}

fn to_csv(worksheet: &Worksheet) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(CSV_COLUMNS).into_diagnostic()?;

        for stored in &worksheet.rows {
            let r = &stored.row;
            let text = |v: &Option<String>| v.clone().unwrap_or_default();
            let num = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();

            writer
                .write_record([
                    stored.id.to_string(),
                    text(&r.item),
                    text(&r.failure_mode),
                    text(&r.effects_of_failure),
                    num(r.severity),
                    text(&r.classification),
                    text(&r.causes_of_failure),
                    num(r.occurrence),
                    text(&r.current_controls_prevention),
                    text(&r.current_controls_detection),
                    num(r.detection),
                    num(r.rpn),
                    text(&r.recommended_actions),
                    text(&r.responsibility),
                    text(&r.target_date),
                    text(&r.actions_taken),
                    text(&r.completion_date),
                    num(r.new_severity),
                    num(r.new_occurrence),
                    num(r.new_detection),
                    num(r.new_rpn),
                    r.risk_level().map(|l| l.to_string()).unwrap_or_default(),
                ])
                .into_diagnostic()?;
        }
        writer.flush().into_diagnostic()?;
    }
    String::from_utf8(buf).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::worksheet::{StoredRow, WorksheetHeader, WorksheetRow};

    #[test]
    fn test_csv_has_one_line_per_row() {
        let worksheet = Worksheet {
            id: 1,
            header: WorksheetHeader::default(),
            rows: vec![
                StoredRow {
                    id: 5,
                    row: WorksheetRow {
                        item: Some("Bolt, M8".to_string()),
                        severity: Some(8),
                        occurrence: Some(3),
                        detection: Some(5),
                        rpn: Some(120),
                        ..Default::default()
                    },
                },
                StoredRow {
                    id: 6,
                    row: WorksheetRow {
                        item: Some("Nut".to_string()),
                        ..Default::default()
                    },
                },
            ],
        };

        let csv = to_csv(&worksheet).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,item,failureMode,"));
        assert!(lines[1].starts_with("5,\"Bolt, M8\",,,8,"));
        assert!(lines[1].ends_with(",medium"));
        assert!(lines[2].starts_with("6,Nut,"));
    }
}
