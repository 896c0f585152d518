mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spott_core::{DedupConfig, MergeMode};
use spott_service::DedupService;
use spott_storage::{MemoryStorage, StorageBackend};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spott-dedup")]
#[command(version)]
#[command(about = "Duplicate location resolver for Spott", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the cleanup endpoint over HTTP
    Serve {
        #[arg(short, long, default_value = "54321")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Merge duplicates once and print the report
    Run {
        /// atomic or best-effort; defaults to SPOTT_DEDUP_MODE
        #[arg(short, long)]
        mode: Option<MergeMode>,
        /// JSON array of locations to merge in memory instead of the database
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print duplicate groups without changing anything
    Detect {
        /// JSON array of locations to read instead of the database
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Create the locations table and its dependent tables
    Migrate,
}

pub(crate) fn get_database_url() -> Result<String> {
    std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable must be set"))
}

/// Postgres-backed service honoring `SPOTT_AUTO_MIGRATE`.
pub(crate) async fn connect_service(config: DedupConfig) -> Result<DedupService> {
    let url = get_database_url()?;
    let storage = StorageBackend::new_postgres(&url, config.auto_migrate).await?;
    Ok(DedupService::new(Arc::new(storage), config))
}

/// Memory-backed service over a JSON array of locations, or Postgres when no
/// file is given.
pub(crate) async fn load_service(
    input: Option<PathBuf>,
    config: DedupConfig,
) -> Result<DedupService> {
    let Some(path) = input else {
        return connect_service(config).await;
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let store = MemoryStorage::from_json(&json)
        .with_context(|| format!("invalid location list in {}", path.display()))?;
    Ok(DedupService::new(Arc::new(StorageBackend::new_memory(store)), config))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Run { mode, input } => commands::run::run(mode, input).await,
        Commands::Detect { input } => commands::detect::run(input).await,
        Commands::Migrate => commands::migrate::run().await,
    }
}
