// src/extractors/report.rs
use std::path::Path;

use super::fields::{Field, CONCEPTS};
use super::sheet::{load_workbook, Sheet};
use crate::utils::error::ExtractError;

/// Rendering of a value no heuristic located.
pub const MISSING: &str = "NaN";

/// Output column names, in record order.
pub const COLUMNS: [&str; 13] = [
    "Stock Ticker",
    "Year",
    "Sales",
    "Total Assets",
    "Goodwill",
    "Corporate Tax(Provision)",
    "Research and Development",
    "Plant,Property and equipment",
    "Intangible Assets",
    "Inventories",
    "Executive compensation",
    "EBIT",
    "Auditor fee",
];

/// One row of the results table: the values found in one stored workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRow {
    pub ticker: String,
    pub year: Option<String>,
    pub sales: Option<String>,
    pub total_assets: Option<String>,
    pub goodwill: Option<String>,
    pub provision: Option<String>,
    pub research_development: Option<String>,
    pub plant: Option<String>,
    pub intangible_assets: Option<String>,
    pub inventory: Option<String>,
    pub stock_compensation: Option<String>,
    pub ebit: Option<String>,
    pub auditor_fee: Option<String>,
}

impl ExtractedRow {
    pub fn new(ticker: &str) -> Self {
        Self { ticker: ticker.to_string(), ..Default::default() }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Year => &self.year,
            Field::Sales => &self.sales,
            Field::TotalAssets => &self.total_assets,
            Field::Goodwill => &self.goodwill,
            Field::Provision => &self.provision,
            Field::ResearchDevelopment => &self.research_development,
            Field::StockCompensation => &self.stock_compensation,
            Field::Plant => &self.plant,
            Field::IntangibleAssets => &self.intangible_assets,
            Field::Inventory => &self.inventory,
            Field::Ebit => &self.ebit,
            Field::AuditorFee => &self.auditor_fee,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Year => &mut self.year,
            Field::Sales => &mut self.sales,
            Field::TotalAssets => &mut self.total_assets,
            Field::Goodwill => &mut self.goodwill,
            Field::Provision => &mut self.provision,
            Field::ResearchDevelopment => &mut self.research_development,
            Field::StockCompensation => &mut self.stock_compensation,
            Field::Plant => &mut self.plant,
            Field::IntangibleAssets => &mut self.intangible_assets,
            Field::Inventory => &mut self.inventory,
            Field::Ebit => &mut self.ebit,
            Field::AuditorFee => &mut self.auditor_fee,
        }
    }

    /// Sales, total assets and year are enough to stop scanning sheets.
    pub fn has_required(&self) -> bool {
        self.sales.is_some() && self.total_assets.is_some() && self.year.is_some()
    }

    /// Values in `COLUMNS` order with missing values rendered as `MISSING`.
    pub fn to_record(&self) -> Vec<String> {
        let value = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
        vec![
            self.ticker.clone(),
            value(&self.year),
            value(&self.sales),
            value(&self.total_assets),
            value(&self.goodwill),
            value(&self.provision),
            value(&self.research_development),
            value(&self.plant),
            value(&self.intangible_assets),
            value(&self.inventory),
            value(&self.stock_compensation),
            value(&self.ebit),
            value(&self.auditor_fee),
        ]
    }
}

/// Runs the concept table over sheets in order. A field keeps the first
/// value found; scanning stops after the first sheet that completes
/// sales, total assets and year.
pub fn extract_row<'a, I>(ticker: &str, sheets: I) -> ExtractedRow
where
    I: IntoIterator<Item = &'a Sheet>,
{
    let mut row = ExtractedRow::new(ticker);

    for sheet in sheets {
        for concept in CONCEPTS.iter() {
            let slot = row.slot_mut(concept.field);
            if slot.is_none() {
                *slot = concept.find(sheet);
            }
        }
        if row.has_required() {
            tracing::debug!("{}: required fields complete after sheet '{}'", ticker, sheet.name);
            break;
        }
    }

    row
}

/// Opens one stored workbook and extracts its row.
pub fn extract_report(ticker: &str, path: &Path) -> Result<ExtractedRow, ExtractError> {
    let sheets = load_workbook(path)?;
    Ok(extract_row(ticker, &sheets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::fixtures::write_workbook;
    use calamine::{Data, ExcelDateTime, ExcelDateTimeType, Range};

    const TITLE: &[&str] = &["Statement - USD ($) $ in Millions", "12 Months Ended"];

    #[test]
    fn test_total_assets_found_on_second_sheet() {
        let sheets = vec![
            Sheet::from_rows("Cover", &[TITLE, &["Entity Registrant Name", "Acme"]]),
            Sheet::from_rows("Balance", &[TITLE, &["Total assets", "", "12,345"]]),
        ];
        let row = extract_row("ACME", &sheets);
        assert_eq!(row.total_assets.as_deref(), Some("12,345"));
        assert_eq!(row.ticker, "ACME");
    }

    #[test]
    fn test_year_uses_second_column() {
        let sheets = vec![Sheet::from_rows("Cover", &[TITLE, &["Document Period End Date", "2021-12-31"]])];
        let row = extract_row("ACME", &sheets);
        assert_eq!(row.get(Field::Year), Some("2021-12-31"));
    }

    #[test]
    fn test_statement_title_is_not_a_label() {
        let sheets = vec![Sheet::from_rows(
            "Ops",
            &[
                &["CONSOLIDATED STATEMENTS OF INCOME (LOSS) - USD ($)", "12 Months Ended"],
                &["", "Dec. 31, 2021"],
                &["Operating income", "5,000"],
            ],
        )];
        let row = extract_row("ACME", &sheets);
        assert_eq!(row.ebit.as_deref(), Some("5,000"));
    }

    #[test]
    fn test_typed_period_end_date_renders_as_date() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("Cover - USD ($)".into()));
        range.set_value((0, 1), Data::String("12 Months Ended".into()));
        range.set_value((1, 0), Data::String("Document Period End Date".into()));
        range.set_value(
            (1, 1),
            Data::DateTime(ExcelDateTime::new(44561.0, ExcelDateTimeType::DateTime, false)),
        );

        let sheet = Sheet::from_range("Cover", &range);
        let row = extract_row("ACME", [&sheet]);
        assert_eq!(row.year.as_deref(), Some("2021-12-31 00:00:00"));
    }

    #[test]
    fn test_extract_report_reads_two_sheet_workbook() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("000032019321000105.xlsx");
        write_workbook(
            &path,
            &[
                ("Cover", &[&["Cover - USD ($)", "12 Months Ended"], &["Entity Registrant Name", "Acme"]]),
                ("Balance", &[&["Consolidated Balance Sheets - USD ($)", "Dec. 31, 2021"], &["Total assets", "", "12,345"]]),
            ],
        );

        let row = extract_report("ACME", &path).unwrap();
        assert_eq!(row.total_assets.as_deref(), Some("12,345"));
        assert_eq!(row.year, None);
    }

    #[test]
    fn test_first_resolved_value_is_kept() {
        let sheets = vec![
            Sheet::from_rows("Ops", &[TITLE, &["Net sales", "100"]]),
            Sheet::from_rows("Segments", &[TITLE, &["Net sales", "999"]]),
        ];
        let row = extract_row("ACME", &sheets);
        assert_eq!(row.sales.as_deref(), Some("100"));
    }

    #[test]
    fn test_stops_once_required_fields_are_complete() {
        let sheets = vec![
            Sheet::from_rows(
                "Cover",
                &[
                    TITLE,
                    &["Document Period End Date", "Dec. 31, 2021"],
                    &["Net sales", "100"],
                    &["Total assets", "500"],
                ],
            ),
            Sheet::from_rows("Balance", &[TITLE, &["Goodwill", "70"], &["Inventories", "30"]]),
        ];
        let row = extract_row("ACME", &sheets);
        assert!(row.has_required());
        assert_eq!(row.goodwill, None);
        assert_eq!(row.inventory, None);
    }

    #[test]
    fn test_exhausts_sheets_when_required_fields_missing() {
        let sheets = vec![
            Sheet::from_rows("Ops", &[TITLE, &["Net sales", "100"]]),
            Sheet::from_rows("Balance", &[TITLE, &["Goodwill", "70"]]),
            Sheet::from_rows("Notes", &[TITLE, &["Inventories", "30"]]),
        ];
        let row = extract_row("ACME", &sheets);
        assert!(!row.has_required());
        assert_eq!(row.goodwill.as_deref(), Some("70"));
        assert_eq!(row.inventory.as_deref(), Some("30"));
        assert_eq!(row.total_assets, None);
    }

    #[test]
    fn test_record_renders_missing_values() {
        let mut row = ExtractedRow::new("ACME");
        row.sales = Some("100".into());
        let record = row.to_record();
        assert_eq!(record.len(), COLUMNS.len());
        assert_eq!(record[0], "ACME");
        assert_eq!(record[1], MISSING);
        assert_eq!(record[2], "100");
        assert!(record[3..].iter().all(|v| v == MISSING));
    }

    #[test]
    fn test_extract_report_rejects_garbage_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("000000000000000000.xlsx");
        std::fs::write(&path, b"PK not really").unwrap();
        assert!(extract_report("ACME", &path).is_err());
    }
}
