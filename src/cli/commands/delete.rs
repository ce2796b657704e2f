//! `fmea-store delete` command - remove a worksheet and all of its rows
//!
//! Administrative only: the HTTP API has no delete endpoint.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use super::{load_config, open_store};
use crate::cli::GlobalOpts;
use crate::core::WorksheetStore;

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Worksheet id
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, None)?;
    let store = open_store(&config)?;

    // Resolve first so an unknown id fails before prompting
    let worksheet = store.get_by_id(args.id)?;

    if !args.yes {
        if !Term::stderr().is_term() {
            return Err(miette::miette!(
                "Refusing to delete worksheet {} without confirmation; pass --yes",
                args.id
            ));
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete worksheet {} ({} row(s))?",
                args.id,
                worksheet.rows.len()
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("{} Aborted", style("✗").yellow());
            return Ok(());
        }
    }

    let rows_removed = store.delete(args.id)?;
    store.close()?;

    println!(
        "{} Deleted worksheet {} and {} row(s)",
        style("✓").green(),
        style(args.id).cyan(),
        rows_removed
    );
    Ok(())
}
