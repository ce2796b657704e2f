//! Command implementations

pub mod completions;
pub mod delete;
pub mod export;
pub mod list;
pub mod serve;
pub mod show;
pub mod status;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::{Config, SqliteWorksheetStore, WorksheetStore};
use crate::entities::worksheet::Worksheet;

/// Which worksheet a command operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorksheetSelector {
    Latest,
    Id(i64),
}

impl FromStr for WorksheetSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("latest") {
            return Ok(WorksheetSelector::Latest);
        }
        s.parse::<i64>()
            .map(WorksheetSelector::Id)
            .map_err(|_| format!("expected a worksheet id or 'latest', got '{}'", s))
    }
}

impl WorksheetSelector {
    pub(crate) fn load(self, store: &SqliteWorksheetStore) -> Result<Worksheet> {
        let worksheet = match self {
            WorksheetSelector::Latest => store.get_latest(),
            WorksheetSelector::Id(id) => store.get_by_id(id),
        };
        worksheet.map_err(|e| miette::miette!("{}", e))
    }
}

/// Resolve configuration for a command from all layers plus global flags
pub(crate) fn load_config(global: &GlobalOpts, bind: Option<String>) -> Result<Config> {
    Ok(Config::load(global.config.as_deref())?.with_overrides(global.database.clone(), bind))
}

/// Open the configured store
pub(crate) fn open_store(config: &Config) -> Result<SqliteWorksheetStore> {
    Ok(SqliteWorksheetStore::open(&config.database)?)
}

/// Write content to a file or stdout
pub(crate) fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            eprintln!(
                "{} Written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
