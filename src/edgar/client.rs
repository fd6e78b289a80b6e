// src/edgar/client.rs
use crate::edgar::models::{ArchiveIndex, CompanySubmission, Filing, FilingsList, FINANCIAL_REPORT_XLSX};
use crate::utils::error::EdgarError;
use reqwest::header;
use std::time::Duration;

/// Browser-like identification sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:130.0) Gecko/20100101 Firefox/130.0";
// SEC asks for 10 requests/second max. Be conservative. >100ms delay.
const EDGAR_REQUEST_DELAY_MS: u64 = 150;

const SUBMISSIONS_BASE: &str = "https://data.sec.gov/submissions";
const ARCHIVES_BASE: &str = "https://www.sec.gov/Archives/edgar/data";

/// Base URLs of the two EDGAR hosts the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarUrls {
    /// Submissions API (`CIK##########.json` and its history pages).
    pub submissions: String,
    /// Filing archive root (`{cik}/{accession}/...`).
    pub archives: String,
}

impl Default for EdgarUrls {
    fn default() -> Self {
        Self {
            submissions: SUBMISSIONS_BASE.to_string(),
            archives: ARCHIVES_BASE.to_string(),
        }
    }
}

/// The EDGAR operations the fetcher depends on.
#[allow(async_fn_in_trait)]
pub trait EdgarSource {
    /// All filings known for a CIK, recent block first, then historical pages.
    /// Fails with `EdgarError::InvalidCik` for malformed or unknown identifiers.
    async fn submissions(&self, cik: &str) -> Result<Vec<Filing>, EdgarError>;

    /// URL of the filing's XLSX export, or `EdgarError::NotFound` if it has none.
    async fn xlsx_url(&self, cik: &str, filing: &Filing) -> Result<String, EdgarError>;

    /// Raw bytes behind a URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>, EdgarError>;
}

/// Validates a CIK from the reference list and pads it to the ten digits
/// the submissions API expects.
pub fn normalize_cik(raw: &str) -> Result<String, EdgarError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > 10 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EdgarError::InvalidCik(raw.to_string()));
    }
    Ok(format!("{:0>10}", trimmed))
}

/// Archive folder URL of a filing. Archive paths use the unpadded CIK.
pub fn archive_folder_url(base: &str, cik: &str, filing: &Filing) -> Result<String, EdgarError> {
    let cik_num: u64 = normalize_cik(cik)?
        .parse()
        .map_err(|_| EdgarError::InvalidCik(cik.to_string()))?;
    Ok(format!("{}/{}/{}", base.trim_end_matches('/'), cik_num, filing.accession_folder()))
}

/// reqwest-backed EDGAR client.
pub struct EdgarClient {
    client: reqwest::Client,
    user_agent: String,
    urls: EdgarUrls,
}

impl EdgarClient {
    pub fn new(user_agent: &str) -> Result<Self, EdgarError> {
        Self::with_urls(user_agent, EdgarUrls::default())
    }

    /// Client against other hosts, e.g. a mirror or a local test server.
    pub fn with_urls(user_agent: &str, urls: EdgarUrls) -> Result<Self, EdgarError> {
        Ok(Self {
            client: build_edgar_client(user_agent)?,
            user_agent: user_agent.to_string(),
            urls,
        })
    }

    /// Issues a GET with the mandatory delay and maps error statuses.
    async fn get(&self, url: &str) -> Result<reqwest::Response, EdgarError> {
        tracing::debug!("GET {} (User-Agent: {})", url, self.user_agent);

        // --- Basic Rate Limiting ---
        tokio::time::sleep(Duration::from_millis(EDGAR_REQUEST_DELAY_MS)).await;

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json,application/octet-stream,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::FORBIDDEN {
                tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
                return Err(EdgarError::RateLimited);
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(EdgarError::NotFound(url.to_string()));
            }
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(EdgarError::Http(status));
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, EdgarError> {
        let body = self.get(url).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| EdgarError::Parse(format!("{}: {}", url, e)))
    }
}

/// Creates a reqwest client configured for EDGAR interaction.
fn build_edgar_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent) // Set the required User-Agent
        .build()
}

impl EdgarSource for EdgarClient {
    async fn submissions(&self, cik: &str) -> Result<Vec<Filing>, EdgarError> {
        let padded = normalize_cik(cik)?;
        let base = self.urls.submissions.trim_end_matches('/');
        let url = format!("{}/CIK{}.json", base, padded);

        let submission: CompanySubmission = match self.get_json(&url).await {
            Ok(submission) => submission,
            Err(EdgarError::NotFound(_)) => return Err(EdgarError::InvalidCik(cik.to_string())),
            Err(e) => return Err(e),
        };
        tracing::debug!("Submissions index for {} ({}) loaded", submission.name, padded);

        let mut filings = submission.filings.recent.into_filings();
        for page in &submission.filings.files {
            let page_url = format!("{}/{}", base, page.name);
            match self.get_json::<FilingsList>(&page_url).await {
                Ok(list) => filings.extend(list.into_filings()),
                // Listed in the index but no longer served.
                Err(EdgarError::NotFound(_)) => {
                    tracing::warn!("Submissions history page missing, skipping: {}", page_url)
                }
                Err(e) => return Err(e),
            }
        }
        Ok(filings)
    }

    async fn xlsx_url(&self, cik: &str, filing: &Filing) -> Result<String, EdgarError> {
        let folder = archive_folder_url(&self.urls.archives, cik, filing)?;
        let index: ArchiveIndex = self.get_json(&format!("{}/index.json", folder)).await?;
        if index.contains(FINANCIAL_REPORT_XLSX) {
            Ok(format!("{}/{}", folder, FINANCIAL_REPORT_XLSX))
        } else {
            Err(EdgarError::NotFound(format!("{}/{}", folder, FINANCIAL_REPORT_XLSX)))
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, EdgarError> {
        tracing::info!("Downloading document from: {}", url);
        let bytes = self.get(url).await?.bytes().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
