//! Loyverse CLI - seed a local `SQLite` database from the Loyverse API.
//!
//! # Usage
//!
//! ```bash
//! # Seed an in-memory database (useful as a dry run of fetch + validate)
//! loyverse seed
//!
//! # Seed a database file, creating it if needed
//! loyverse seed loyverse.db
//!
//! # Refresh only the receipts table
//! loyverse seed loyverse.db --only receipts
//! ```
//!
//! Requires `LOYVERSE_API_KEY` (read from the environment or `.env`).
//! Log verbosity follows `RUST_LOG` (default `info`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "loyverse")]
#[command(author, version, about = "Loyverse POS ETL tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, validate, and store employees, customers, variants, items,
    /// and receipts
    Seed {
        /// `SQLite` database file; in-memory when omitted
        database: Option<String>,

        /// Seed a single resource instead of all of them
        #[arg(long, value_enum)]
        only: Option<SeedResource>,
    },
}

/// Resources the seeder can store.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeedResource {
    Employees,
    Customers,
    Variants,
    Items,
    Receipts,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { database, only } => {
            commands::seed::run(database.as_deref(), only).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_database_is_optional() {
        let cli = Cli::try_parse_from(["loyverse", "seed"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Seed {
                database: None,
                only: None
            })
        ));
    }

    #[test]
    fn test_seed_only_receipts() {
        let cli = Cli::try_parse_from(["loyverse", "seed", "pos.db", "--only", "receipts"]);
        match cli.map(|c| c.command) {
            Ok(Commands::Seed { database, only }) => {
                assert_eq!(database.as_deref(), Some("pos.db"));
                assert!(matches!(only, Some(SeedResource::Receipts)));
            }
            Err(e) => panic!("parse failed: {e}"),
        }
    }
}
