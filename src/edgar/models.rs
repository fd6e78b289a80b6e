// src/edgar/models.rs
use serde::Deserialize;

/// Form type of the annual report filings we keep.
pub const ANNUAL_REPORT_FORM: &str = "10-K";

/// Name of the XLSX export EDGAR renders for XBRL filings.
pub const FINANCIAL_REPORT_XLSX: &str = "Financial_Report.xlsx";

/// Structure representing the EDGAR company submission index.
/// Only the fields the fetcher needs are modelled.
/// Example: https://data.sec.gov/submissions/CIK0000320193.json
#[derive(Debug, Deserialize)]
pub struct CompanySubmission {
    #[serde(default)]
    pub name: String,
    pub filings: Filings,
}

#[derive(Debug, Deserialize)]
pub struct Filings {
    pub recent: FilingsList,
    #[serde(default)]
    pub files: Vec<FilingFile>,
}

/// A paginated historical submissions file, e.g. `CIK0000320193-submissions-001.json`.
#[derive(Debug, Deserialize)]
pub struct FilingFile {
    pub name: String,
}

/// Column-oriented filing list, shared by `filings.recent` and the historical pages.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingsList {
    #[serde(default)]
    pub accession_number: Vec<String>,
    #[serde(default)]
    pub filing_date: Vec<String>,
    #[serde(default)]
    pub form: Vec<String>,
}

impl FilingsList {
    /// Zips the parallel columns into row records. Rows with a missing
    /// accession number or form are dropped.
    pub fn into_filings(self) -> Vec<Filing> {
        let FilingsList { accession_number, filing_date, form } = self;
        accession_number
            .into_iter()
            .enumerate()
            .filter_map(|(i, acc)| {
                let form = form.get(i)?.clone();
                Some(Filing {
                    accession_number: acc,
                    form,
                    filing_date: filing_date.get(i).cloned().unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// One filing record as returned by the submissions index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filing {
    pub accession_number: String,
    pub form: String,
    pub filing_date: String, // YYYY-MM-DD
}

impl Filing {
    pub fn is_annual_report(&self) -> bool {
        self.form == ANNUAL_REPORT_FORM
    }

    /// Accession number as used in archive folder names.
    pub fn accession_folder(&self) -> String {
        self.accession_number.replace('-', "")
    }

    /// Year of the filing date, if it parses.
    pub fn filing_year(&self) -> Option<i32> {
        use chrono::Datelike;
        chrono::NaiveDate::parse_from_str(&self.filing_date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

/// Directory listing of one filing's archive folder (`index.json`).
#[derive(Debug, Deserialize)]
pub struct ArchiveIndex {
    pub directory: ArchiveDirectory,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveDirectory {
    #[serde(default)]
    pub item: Vec<ArchiveItem>,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveItem {
    pub name: String,
}

impl ArchiveIndex {
    pub fn contains(&self, file_name: &str) -> bool {
        self.directory.item.iter().any(|item| item.name == file_name)
    }
}

/// A company row from the reference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub cik: String,
}
