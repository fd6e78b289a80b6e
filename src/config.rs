// src/config.rs
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::edgar::client::DEFAULT_USER_AGENT;
use crate::edgar::fetcher::YearRange;
use crate::utils::AppError;

/// Command Line Interface for the SEC 10-K XLSX fetcher and extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Reference CSV listing companies (name in column 1, CIK in column 6)
    #[arg(long, global = true, default_value = "sp500.csv")]
    pub reference: PathBuf,

    /// Root directory holding one folder of XLSX exports per company
    #[arg(short, long, global = true, default_value = "Output")]
    pub output_dir: PathBuf,

    /// CSV file the extracted table is written to
    #[arg(short, long, global = true, default_value = "financials.csv")]
    pub results: PathBuf,

    /// User-Agent header sent to EDGAR
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Download the XLSX export of every 10-K filing in the reference list
    Fetch(YearFilter),
    /// Extract line items from the downloaded exports into the results CSV
    Extract,
    /// Fetch, then extract
    Run(YearFilter),
}

#[derive(ClapArgs, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearFilter {
    /// Only keep filings made in or after this year
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Only keep filings made in or before this year
    #[arg(long)]
    pub end_year: Option<i32>,
}

/// Settings shared by both stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub reference: PathBuf,
    pub output_dir: PathBuf,
    pub results: PathBuf,
    pub user_agent: String,
    pub years: YearRange,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, AppError> {
        let filter = match args.command {
            Command::Fetch(filter) | Command::Run(filter) => filter,
            Command::Extract => YearFilter::default(),
        };
        if let (Some(start), Some(end)) = (filter.start_year, filter.end_year) {
            if start > end {
                return Err(AppError::Config(format!("start year {} is after end year {}", start, end)));
            }
        }
        if args.user_agent.trim().is_empty() {
            return Err(AppError::Config("user agent must not be empty".to_string()));
        }

        Ok(Self {
            reference: args.reference.clone(),
            output_dir: args.output_dir.clone(),
            results: args.results.clone(),
            user_agent: args.user_agent.clone(),
            years: YearRange { start: filter.start_year, end: filter.end_year },
        })
    }
}
