//! Asset Inventory Command Line Interface
//!
//! Usage:
//!   inventory init     - Initialize the database and run migrations
//!   inventory start    - Start the inventory API server

use clap::{Parser, Subcommand};
use inventory_api::{run_server, ApiConfig};
use inventory_db::InventoryDb;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inventory")]
#[command(about = "IT asset inventory server CLI")]
#[command(version)]
struct Cli {
    /// SQLite database file path
    #[arg(long, default_value = "assets.db", env = "INVENTORY_DB")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema and run startup migrations
    Init,

    /// Start the inventory API server
    Start {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "4000", env = "PORT")]
        port: u16,
        /// Shared secret gating the fingerprint report
        #[arg(long, env = "SCAN_TOKEN")]
        scan_token: Option<String>,
        /// Disable CORS (on by default for browser frontends)
        #[arg(long)]
        no_cors: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run_command(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Init => {
            println!("Initializing inventory database at {}...", cli.db.display());

            let db = open_and_migrate(&cli.db).await?;
            drop(db);

            println!("Database schema initialized successfully.");
            Ok(())
        }

        Commands::Start {
            host,
            port,
            scan_token,
            no_cors,
        } => {
            println!("Starting inventory API server on {}:{}...", host, port);

            let db = open_and_migrate(&cli.db).await?;
            let config = ApiConfig {
                host,
                port,
                enable_cors: !no_cors,
                scan_token,
            };
            run_server(db, &config).await
        }
    }
}

/// Open the database and bring it up to date. The server must not accept
/// traffic before the identity indexes are in place, so a migration failure
/// here is fatal.
async fn open_and_migrate(path: &PathBuf) -> Result<InventoryDb, Box<dyn std::error::Error>> {
    let db = InventoryDb::open(path).await?;
    db.init_schema().await?;
    let summary = inventory_db::migrations::run(&db).await?;
    if summary.cleared_macs > 0 || summary.cleared_ips > 0 {
        println!(
            "Cleared duplicate identity values: {} MACs, {} IPs.",
            summary.cleared_macs, summary.cleared_ips
        );
    }
    Ok(db)
}
