// src/edgar/fetcher.rs
use crate::edgar::client::EdgarSource;
use crate::edgar::models::{Company, Filing};
use crate::storage::StorageManager;
use crate::utils::error::AppError;

/// Optional inclusive bounds on the filing-date year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    pub fn contains(&self, filing: &Filing) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        match filing.filing_year() {
            Some(year) => {
                self.start.map_or(true, |s| year >= s) && self.end.map_or(true, |e| year <= e)
            }
            None => false,
        }
    }
}

/// Counters reported at the end of a fetch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub companies: usize,
    pub invalid_ciks: usize,
    pub downloaded: usize,
    pub missed: usize,
}

/// Downloads the XLSX export of every 10-K filing of every company.
///
/// Companies with an invalid CIK are skipped. Filings without an export
/// are counted as missed. Any other error ends the run.
pub async fn fetch_all<S: EdgarSource>(
    source: &S,
    storage: &StorageManager,
    companies: &[Company],
    years: YearRange,
) -> Result<FetchSummary, AppError> {
    let mut summary = FetchSummary::default();

    for (idx, company) in companies.iter().enumerate() {
        tracing::info!("[{}/{}] {} (CIK {})", idx + 1, companies.len(), company.name, company.cik);
        summary.companies += 1;
        storage.company_dir(&company.name)?;

        let filings = match source.submissions(&company.cik).await {
            Ok(filings) => filings,
            Err(e) if e.is_invalid_cik() => {
                tracing::warn!("Failed for {}: {}", company.name, e);
                summary.invalid_ciks += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let (downloaded, missed) = fetch_company(source, storage, company, filings, years).await?;
        summary.downloaded += downloaded;
        summary.missed += missed;
    }

    tracing::info!(
        "Fetch finished. Companies: {}, invalid CIKs: {}, downloaded: {}, missed: {}",
        summary.companies,
        summary.invalid_ciks,
        summary.downloaded,
        summary.missed
    );
    Ok(summary)
}

/// Resolves and downloads the annual report exports of one company.
/// Returns `(downloaded, missed)`.
async fn fetch_company<S: EdgarSource>(
    source: &S,
    storage: &StorageManager,
    company: &Company,
    filings: Vec<Filing>,
    years: YearRange,
) -> Result<(usize, usize), AppError> {
    let selected: Vec<Filing> = filings
        .into_iter()
        .filter(|f| f.is_annual_report() && years.contains(f))
        .collect();
    tracing::info!("Found {} 10-K for {}", selected.len(), company.name);

    let mut downloads = Vec::new();
    let mut missed = 0;
    for filing in selected {
        match source.xlsx_url(&company.cik, &filing).await {
            Ok(url) => downloads.push((filing, url)),
            Err(e) if e.is_not_found() => {
                tracing::debug!("No XLSX export for {}: {}", filing.accession_number, e);
                missed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
    tracing::info!("{} reports to be downloaded for {} [missed {}]", downloads.len(), company.cik, missed);

    let total = downloads.len();
    for (done, (filing, url)) in downloads.iter().enumerate() {
        let bytes = source.download(url).await?;
        storage.save_report(&company.name, &filing.accession_folder(), &bytes)?;
        tracing::info!("Downloaded [{}/{}]", done + 1, total);
    }

    Ok((total, missed))
}
