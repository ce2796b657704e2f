//! `fmea-store list` command - saved worksheets, newest first

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use super::{load_config, open_store};
use crate::cli::helpers::{text_cell, truncate_str, tsv_field};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::WorksheetStore;
use crate::entities::worksheet::WorksheetSummary;

const COLUMNS: [&str; 4] = ["ID", "Product", "FMEA No.", "Prepared"];

pub fn run(global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, None)?;
    let store = open_store(&config)?;
    let summaries = store.list()?;

    print!("{}", render(&summaries, global.format)?);
    Ok(())
}

fn render(summaries: &[WorksheetSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(summaries).into_diagnostic()?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Tsv => {
            let mut out = COLUMNS.join("\t");
            out.push('\n');
            for s in summaries {
                out.push_str(&format!(
                    "{}\t{}\t{}\t{}\n",
                    s.id,
                    tsv_field(s.product_name.as_deref().unwrap_or("")),
                    tsv_field(s.fmea_number.as_deref().unwrap_or("")),
                    tsv_field(s.date_prepared.as_deref().unwrap_or("")),
                ));
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            {
                let mut writer = csv::Writer::from_writer(&mut buf);
                writer.write_record(COLUMNS).into_diagnostic()?;
                for s in summaries {
                    writer
                        .write_record([
                            s.id.to_string().as_str(),
                            s.product_name.as_deref().unwrap_or(""),
                            s.fmea_number.as_deref().unwrap_or(""),
                            s.date_prepared.as_deref().unwrap_or(""),
                        ])
                        .into_diagnostic()?;
                }
                writer.flush().into_diagnostic()?;
            }
            String::from_utf8(buf).into_diagnostic()
        }
        OutputFormat::Auto | OutputFormat::Md => {
            if summaries.is_empty() {
                return Ok(format!("{}\n", style("No worksheets saved yet").dim()));
            }

            let mut builder = Builder::default();
            builder.push_record(COLUMNS);
            for s in summaries {
                builder.push_record([
                    s.id.to_string(),
                    truncate_str(&text_cell(&s.product_name), 40),
                    text_cell(&s.fmea_number),
                    text_cell(&s.date_prepared),
                ]);
            }

            let mut table = builder.build();
            if format == OutputFormat::Md {
                table.with(Style::markdown());
            } else {
                table.with(Style::rounded());
            }
            Ok(format!(
                "{}\n{} worksheet(s)\n",
                table,
                style(summaries.len()).cyan()
            ))
        }
    }
}
