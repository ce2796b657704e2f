//! `fmea-store serve` command - run the worksheet JSON API
//!
//! The store is opened once here and shared with every request handler.
//! On Ctrl-C the server drains open connections and the store is closed.

use std::sync::Arc;

use console::style;
use miette::{IntoDiagnostic, Result};

use super::{load_config, open_store};
use crate::api::{self, AppState};
use crate::cli::GlobalOpts;
use crate::core::{Config, SqliteWorksheetStore};

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (default: 127.0.0.1:5000, or FMEA_BIND)
    #[arg(long, short = 'b')]
    pub bind: Option<String>,
}

pub fn run(args: ServeArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, args.bind)?;
    let store = Arc::new(open_store(&config)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;
    runtime.block_on(serve(&config, Arc::clone(&store)))?;

    match Arc::try_unwrap(store) {
        Ok(store) => store.close()?,
        Err(_) => log::warn!("Store still referenced at shutdown; leaving it to drop"),
    }
    Ok(())
}

async fn serve(config: &Config, store: Arc<SqliteWorksheetStore>) -> Result<()> {
    let app = api::router_with_cors(AppState::new(store), &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind.as_str())
        .await
        .map_err(|e| miette::miette!("Failed to bind {}: {}", config.bind, e))?;
    let addr = listener.local_addr().into_diagnostic()?;

    log::info!(
        "Serving FMEA API on http://{} (database: {}, origins: {})",
        addr,
        config.database.display(),
        config.allowed_origins.join(", ")
    );
    eprintln!(
        "{} Serving FMEA API on {}",
        style("→").blue(),
        style(format!("http://{}", addr)).cyan()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
