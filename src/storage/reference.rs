// src/storage/reference.rs
use std::io::Read;
use std::path::Path;

use crate::edgar::models::Company;
use crate::utils::error::{AppError, StorageError};

// Positions of the consumed columns in the reference CSV.
const NAME_COLUMN: usize = 1;
const CIK_COLUMN: usize = 6;

/// Loads the company list from a CSV file with a header row.
pub fn load_companies<P: AsRef<Path>>(path: P) -> Result<Vec<Company>, AppError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::Config(format!("cannot open reference list {}: {}", path.display(), e)))?;
    read_companies(file)
}

/// Parses company rows by column position. A row without a name or CIK
/// column is malformed reference data.
pub fn read_companies<R: Read>(reader: R) -> Result<Vec<Company>, AppError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut companies = Vec::new();
    for (line, record) in csv.records().enumerate() {
        let record = record.map_err(StorageError::from)?;
        let column = |idx: usize| {
            record.get(idx).map(str::to_string).ok_or_else(|| {
                AppError::Config(format!("reference row {} has no column {}", line + 2, idx))
            })
        };
        companies.push(Company {
            name: column(NAME_COLUMN)?,
            cik: column(CIK_COLUMN)?,
        });
    }

    tracing::info!("Loaded {} companies from reference list", companies.len());
    Ok(companies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_by_position_and_skips_header() {
        let data = "Symbol,Security,GICS Sector,GICS Sub-Industry,HQ,Added,CIK,Founded\n\
                    MMM,3M,Industrials,Conglomerates,\"Saint Paul, Minnesota\",1957-03-04,66740,1902\n\
                    AOS,A. O. Smith,Industrials,Building Products,\"Milwaukee, Wisconsin\",2017-07-26,91142,1916\n";
        let companies = read_companies(data.as_bytes()).unwrap();
        assert_eq!(
            companies,
            vec![
                Company { name: "3M".into(), cik: "66740".into() },
                Company { name: "A. O. Smith".into(), cik: "91142".into() },
            ]
        );
    }

    #[test]
    fn test_short_row_is_config_error() {
        let data = "a,b,c,d,e,f,g\nMMM,3M,Industrials\n";
        let err = read_companies(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("column 6")));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_companies("/definitely/not/here/sp500.csv").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
