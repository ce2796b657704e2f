use clap::Parser;
use fmea_store::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping `list` or `export` to `head` panics on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let default_filter = if global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Serve(args) => fmea_store::cli::commands::serve::run(args, &global),
        Commands::List => fmea_store::cli::commands::list::run(&global),
        Commands::Show(args) => fmea_store::cli::commands::show::run(args, &global),
        Commands::Export(args) => fmea_store::cli::commands::export::run(args, &global),
        Commands::Delete(args) => fmea_store::cli::commands::delete::run(args, &global),
        Commands::Status => fmea_store::cli::commands::status::run(&global),
        Commands::Completions(args) => fmea_store::cli::commands::completions::run(args),
    }
}
