//! Bodega CLI - database migrations and diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations (drafts schema + session table)
//! bodega-cli migrate
//!
//! # Verify connectivity and credentials against the inventory backend
//! bodega-cli check-api -e admin@example.com
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run admin database migrations
//! - `check-api` - Authenticate against the inventory backend once

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bodega-cli")]
#[command(author, version, about = "Bodega Admin CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run admin database migrations
    Migrate,
    /// Authenticate against the inventory backend to verify configuration
    CheckApi {
        /// Email to authenticate with
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::CheckApi { email } => commands::check::run(&email).await?,
    }
    Ok(())
}
