// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 500 Internal Server Error

    #[error("SEC Rate limit likely exceeded")]
    RateLimited,

    #[error("Invalid CIK: {0}")]
    InvalidCik(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to parse EDGAR response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook has no sheets: {0}")]
    EmptyWorkbook(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("EDGAR interaction failed: {0}")]
    Edgar(#[from] EdgarError), // Automatically convert Edgar errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl EdgarError {
    /// True for the conditions the fetcher treats as "skip this company".
    pub fn is_invalid_cik(&self) -> bool {
        matches!(self, EdgarError::InvalidCik(_))
    }

    /// True when the requested resource simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EdgarError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_helpers() {
        assert!(EdgarError::InvalidCik("abc".into()).is_invalid_cik());
        assert!(!EdgarError::InvalidCik("abc".into()).is_not_found());
        assert!(EdgarError::NotFound("x".into()).is_not_found());
        assert!(!EdgarError::RateLimited.is_invalid_cik());
    }

    #[test]
    fn test_app_error_wraps_edgar_error() {
        let err: AppError = EdgarError::Parse("bad json".into()).into();
        assert_eq!(
            err.to_string(),
            "EDGAR interaction failed: Failed to parse EDGAR response: bad json"
        );
    }
}
