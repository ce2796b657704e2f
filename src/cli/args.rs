//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, delete::DeleteArgs, export::ExportArgs, serve::ServeArgs,
    show::ShowArgs,
};

#[derive(Parser)]
#[command(name = "fmea-store")]
#[command(author, version, about = "FMEA worksheet store")]
#[command(long_about = "Persistence backend and JSON API for FMEA (Failure Mode and Effects Analysis) worksheets.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// SQLite database file (default: fmea.db, or FMEA_DATABASE)
    #[arg(long, short = 'd', global = true)]
    pub database: Option<PathBuf>,

    /// Extra YAML config file layered over the user config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the worksheet JSON API
    Serve(ServeArgs),

    /// List saved worksheets, newest first
    List,

    /// Show one worksheet (header and rows)
    Show(ShowArgs),

    /// Export a worksheet's rows as CSV or JSON
    Export(ExportArgs),

    /// Delete a worksheet and all of its rows
    Delete(DeleteArgs),

    /// Show database location, schema version and record counts
    Status,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Auto,
    /// JSON format (same shape as the API)
    Json,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}
