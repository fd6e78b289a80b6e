// src/extractors/batch.rs
use super::fields::Field;
use super::report::{extract_report, ExtractedRow};
use crate::storage::StorageManager;
use crate::utils::error::StorageError;

/// Outcome of one extraction pass over the output tree.
#[derive(Debug, Default)]
pub struct ExtractionSummary {
    pub rows: Vec<ExtractedRow>,
    pub failed: usize,
}

/// Extracts one row per stored workbook. A workbook that cannot be read
/// is logged and skipped; only listing the tree itself can fail.
pub fn extract_all(storage: &StorageManager) -> Result<ExtractionSummary, StorageError> {
    let reports = storage.list_reports()?;
    tracing::info!("Extracting from {} stored reports under {}", reports.len(), storage.base_dir().display());

    let mut summary = ExtractionSummary::default();
    for report in reports {
        match extract_report(&report.ticker, &report.path) {
            Ok(row) => {
                tracing::debug!(
                    "{}: year={:?} sales={:?} total_assets={:?}",
                    report.path.display(),
                    row.get(Field::Year),
                    row.get(Field::Sales),
                    row.get(Field::TotalAssets)
                );
                summary.rows.push(row);
            }
            Err(e) => {
                tracing::error!("Error processing {}: {}", report.path.display(), e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!("Extraction finished. Rows: {}, Failures: {}", summary.rows.len(), summary.failed);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::fixtures::write_workbook;

    #[test]
    fn test_one_row_per_stored_workbook() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(tmp.path()).unwrap();
        let company = storage.company_dir("Apple").unwrap();
        write_workbook(
            &company.join("000032019321000105.xlsx"),
            &[
                ("Cover", &[&["Cover - USD ($)", "12 Months Ended"], &["Entity Registrant Name", "Apple Inc."]]),
                ("Balance", &[&["Consolidated Balance Sheets - USD ($)", "Dec. 31, 2021"], &["Total assets", "", "12,345"]]),
            ],
        );
        storage.save_report("Apple", "000032019322000108", b"corrupt").unwrap();

        let summary = extract_all(&storage).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.rows.len(), 1);
        let row = &summary.rows[0];
        assert_eq!(row.ticker, "Apple");
        assert_eq!(row.total_assets.as_deref(), Some("12,345"));
        assert_eq!(row.sales, None);
    }

    #[test]
    fn test_unreadable_reports_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(tmp.path()).unwrap();
        storage.save_report("AAPL", "000032019323000106", b"garbage").unwrap();
        storage.save_report("MSFT", "000095017023035122", b"more garbage").unwrap();
        std::fs::write(storage.company_dir("MSFT").unwrap().join("~$lock.xlsx"), b"lock").unwrap();

        let summary = extract_all(&storage).unwrap();
        assert!(summary.rows.is_empty());
        assert_eq!(summary.failed, 2);
    }

    #[test]
    fn test_empty_tree_gives_no_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(tmp.path()).unwrap();
        let summary = extract_all(&storage).unwrap();
        assert!(summary.rows.is_empty());
        assert_eq!(summary.failed, 0);
    }
}
