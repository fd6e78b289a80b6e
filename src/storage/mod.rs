// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::utils::error::StorageError;

pub mod reference;
pub mod results;

/// Extension of stored spreadsheet exports.
pub const REPORT_EXTENSION: &str = "xlsx";

/// A stored spreadsheet together with the company folder it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    pub ticker: String, // folder name
    pub path: PathBuf,
}

/// Owns the `<output-root>/<company>/<accession>.xlsx` layout shared by
/// the fetcher and the extractor.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Creates (if needed) and returns the folder of one company.
    pub fn company_dir(&self, company: &str) -> Result<PathBuf, StorageError> {
        let dir = self.base_dir.join(company);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Writes one downloaded export, replacing any previous copy.
    pub fn save_report(&self, company: &str, accession: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let file_path = self
            .company_dir(company)?
            .join(format!("{}.{}", accession, REPORT_EXTENSION));
        fs::write(&file_path, bytes)?;
        tracing::debug!("Saved {} bytes to {}", bytes.len(), file_path.display());
        Ok(file_path)
    }

    /// Lists every stored export, company folders and files in name order.
    /// Excel lock files (`~$...`) and files with other extensions are skipped.
    pub fn list_reports(&self) -> Result<Vec<StoredReport>, StorageError> {
        let mut reports = Vec::new();

        for company_dir in sorted_entries(&self.base_dir)? {
            if !company_dir.is_dir() {
                continue;
            }
            let ticker = match company_dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            for path in sorted_entries(&company_dir)? {
                let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
                if file_name.starts_with("~$") {
                    tracing::info!("Skipping temporary file: {}", file_name);
                    continue;
                }
                let is_report = path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(REPORT_EXTENSION);
                if is_report {
                    reports.push(StoredReport { ticker: ticker.clone(), path });
                }
            }
        }

        Ok(reports)
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}
