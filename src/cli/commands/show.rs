//! `fmea-store show` command - one worksheet with its rows

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use super::{load_config, open_store, WorksheetSelector};
use crate::cli::helpers::{number_cell, text_cell, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::worksheet::{Worksheet, WorksheetRow};

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Worksheet id, or `latest`
    #[arg(default_value = "latest")]
    pub worksheet: WorksheetSelector,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, None)?;
    let store = open_store(&config)?;
    let worksheet = args.worksheet.load(&store)?;

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&worksheet.document()).into_diagnostic()?;
            println!("{}", json);
        }
        format => print!("{}", render(&worksheet, format == OutputFormat::Md)),
    }
    Ok(())
}

fn render(worksheet: &Worksheet, markdown: bool) -> String {
    let h = &worksheet.header;
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} {}\n",
        style(format!("FMEA #{}", worksheet.id)).bold(),
        text_cell(&h.fmea_type),
        text_cell(&h.fmea_number)
    ));
    for (label, value) in [
        ("Company", &h.company),
        ("Product", &h.product_name),
        ("Product No.", &h.product_number),
        ("Model Year", &h.model_year),
        ("Team", &h.team),
        ("Prepared By", &h.prepared_by),
        ("Date Prepared", &h.date_prepared),
        ("Approved By", &h.approved_by),
        ("Date Approved", &h.date_approved),
        ("Revision", &h.revision),
        ("Page", &h.page),
    ] {
        out.push_str(&format!("  {:<14} {}\n", label, text_cell(value)));
    }
    out.push('\n');

    if worksheet.rows.is_empty() {
        out.push_str(&format!("{}\n", style("No rows").dim()));
        return out;
    }

    let mut builder = Builder::default();
    builder.push_record([
        "#", "Item", "Failure Mode", "Effect", "S", "O", "D", "RPN", "Level", "Actions", "New RPN",
    ]);

    let mut stale = 0;
    for (index, stored) in worksheet.rows.iter().enumerate() {
        let row = &stored.row;
        if row.is_rpn_stale() || row.is_new_rpn_stale() {
            stale += 1;
        }
        builder.push_record([
            (index + 1).to_string(),
            truncate_str(&text_cell(&row.item), 20),
            truncate_str(&text_cell(&row.failure_mode), 24),
            truncate_str(&text_cell(&row.effects_of_failure), 24),
            number_cell(row.severity),
            number_cell(row.occurrence),
            number_cell(row.detection),
            rpn_cell(row.rpn, row.is_rpn_stale()),
            row.risk_level().map_or("-".to_string(), |l| l.to_string()),
            truncate_str(&text_cell(&row.recommended_actions), 24),
            rpn_cell(row.new_rpn, row.is_new_rpn_stale()),
        ]);
    }

    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    out.push_str(&table.to_string());
    out.push('\n');

    out.push_str(&format!("{} row(s)\n", worksheet.rows.len()));
    if stale > 0 {
        out.push_str(&format!(
            "{} {} row(s) have an RPN that differs from S×O×D (marked *)\n",
            style("!").yellow(),
            stale
        ));
    }
    out
}

fn rpn_cell(rpn: Option<i64>, stale: bool) -> String {
    let cell = number_cell(rpn);
    if stale {
        format!("{}*", cell)
    } else {
        cell
    }
}

/// Rows whose stored RPNs disagree with their ratings
pub fn stale_rows(worksheet: &Worksheet) -> Vec<&WorksheetRow> {
    worksheet
        .rows
        .iter()
        .map(|stored| &stored.row)
        .filter(|row| row.is_rpn_stale() || row.is_new_rpn_stale())
        .collect()
}
