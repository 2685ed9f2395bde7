// StorePass: Application Entry Point
//
// Parses CLI arguments, initializes structured logging (which never emits
// secret values), and dispatches to the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use storepass::cli::{execute, Cli};

fn main() {
    // RUST_LOG=storepass=debug for verbose output. The default level is
    // `info`, which never includes secret values.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storepass=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
