//! `fmea-store status` command - database location and record counts

use console::style;
use miette::Result;

use super::{load_config, open_store};
use crate::cli::GlobalOpts;
use crate::core::SCHEMA_VERSION;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, None)?;
    let store = open_store(&config)?;

    let counts = store.counts()?;
    let version = store.schema_version()?.unwrap_or(SCHEMA_VERSION);
    let db_size_bytes = std::fs::metadata(&config.database)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("{}", style("Store Status").bold());
    println!("{}", style("─".repeat(40)).dim());
    println!("  Location:        {}", config.database.display());
    println!("  Schema version:  {}", version);
    println!("  Worksheets:      {}", style(counts.headers).cyan());
    println!("  Rows:            {}", style(counts.rows).cyan());
    println!(
        "  Database size:   {} KB",
        style(db_size_bytes / 1024).cyan()
    );

    store.close()?;
    Ok(())
}
