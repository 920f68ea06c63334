//! # Listify CLI
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Parse arguments (clap)                                             │
//! │  2. Initialize tracing (stderr, RUST_LOG or -v)                        │
//! │  3. Load config: listify.toml, then LISTIFY_* env, then --db           │
//! │  4. Open database (runs migrations)                                    │
//! │  5. Run the subcommand, print text or JSON to stdout                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::App;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let app = match App::open(&cli).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {}", e.message);
            std::process::exit(1);
        }
    };

    let result = app.run(cli.command).await;
    app.close().await;

    if let Err(e) = result {
        eprintln!("error: {}", e.message);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - default - warnings, plus info from the CLI and the sync engine
/// - `-v` - debug from the listify crates
/// - `RUST_LOG=...` - overrides both
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `listify` is a target prefix and also matches `listify_db`, so the
/// database crate is pinned back to warn unless `-v` is given.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,listify=debug,sqlx=warn"
    } else {
        "warn,listify=info,listify_db=warn,sqlx=warn"
    }
}
