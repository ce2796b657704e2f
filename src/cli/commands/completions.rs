//! `fmea-store completions` command - shell completion scripts
//!
//! ```bash
//! source <(fmea-store completions bash)
//! fmea-store completions fish -o ~/.config/fish/completions/fmea-store.fish
//! ```

use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::{IntoDiagnostic, Result};

use super::write_output;
use crate::cli::Cli;

const BIN_NAME: &str = "fmea-store";

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let script = script_for(args.shell)?;
    write_output(&script, args.output)
}

fn script_for(shell: Shell) -> Result<String> {
    let mut buf = Vec::new();
    generate(shell, &mut Cli::command(), BIN_NAME, &mut buf);
    String::from_utf8(buf).into_diagnostic()
}
