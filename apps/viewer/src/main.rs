//! # Zebraget Viewer
//!
//! Terminal presentation layer for the product catalog.
//!
//! ## Commands
//! ```text
//! zebraget list [--query milk]     catalog, filtered by name
//! zebraget show 3                  product detail with its barcode
//! zebraget server                  print the configured server
//! zebraget server http://h:3000    change it (normalized, saved)
//! zebraget server --clear          go offline-only
//! ```
//!
//! Every catalog command runs one `CatalogSource::load()`; a cached result
//! prints an offline banner first.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zebraget_catalog::ViewerConfig;

#[derive(Parser)]
#[command(name = "zebraget")]
#[command(about = "Product catalog viewer with EAN-13 barcodes")]
#[command(
    after_help = "Environment:\n  ZEBRAGET_SERVER_URL          Server base URL\n  ZEBRAGET_CACHE_PATH          Cache file\n  ZEBRAGET_HTTP_TIMEOUT_SECS   HTTP timeout\n  RUST_LOG                     Log filter"
)]
struct Cli {
    /// Config file (defaults to viewer.toml in the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    List {
        /// Case-insensitive name filter
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show one product and its barcode
    Show {
        id: i64,
    },
    /// Print or change the server endpoint
    Server {
        url: Option<String>,

        /// Remove the configured server
        #[arg(long, conflicts_with = "url")]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = ViewerConfig::load_or_default(cli.config.clone());
    debug!(server = ?config.server_url(), "Viewer config resolved");

    let ok = match cli.command {
        Commands::List { query } => {
            commands::catalog::list(&config, query.as_deref(), cli.json).await?
        }
        Commands::Show { id } => commands::catalog::show(&config, id, cli.json).await?,
        Commands::Server { url, clear } => {
            commands::server::run(config, cli.config, url.as_deref(), clear)?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,zebraget=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
