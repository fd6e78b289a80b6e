// src/main.rs
mod config;
mod edgar;
mod extractors;
mod storage;
mod utils;

use clap::Parser;
use config::{Args, Command, Config};
use edgar::client::EdgarClient;
use edgar::fetcher;
use storage::StorageManager;
use utils::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);
    let config = Config::from_args(&args)?;

    // 3. Initialize storage
    let storage = StorageManager::new(&config.output_dir)?;

    match args.command {
        Command::Fetch(_) => fetch(&config, &storage).await,
        Command::Extract => extract(&config, &storage),
        Command::Run(_) => {
            fetch(&config, &storage).await?;
            extract(&config, &storage)
        }
    }
}

/// Stage 1: download every 10-K XLSX export into the output tree.
async fn fetch(config: &Config, storage: &StorageManager) -> Result<(), AppError> {
    let companies = storage::reference::load_companies(&config.reference)?;
    let client = EdgarClient::new(&config.user_agent)?;
    fetcher::fetch_all(&client, storage, &companies, config.years).await?;
    Ok(())
}

/// Stage 2: extract one row per stored export and write the table once.
fn extract(config: &Config, storage: &StorageManager) -> Result<(), AppError> {
    let summary = extractors::extract_all(storage)?;
    storage::results::write_results(&config.results, &summary.rows)?;
    tracing::info!(
        "Data extraction complete. {} rows saved to {}",
        summary.rows.len(),
        config.results.display()
    );
    Ok(())
}
