// src/source.rs
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ReportError, Result};
use crate::period::ReportPeriod;
use crate::record::{parse_records, AttendanceRecord};

// --- CSV Source Contract ---

/// Supplies the raw monthly export for a period. Implementations must fail
/// with [`ReportError::SourceUnavailable`] when the period has no data.
#[async_trait]
pub trait CsvSource: Send + Sync {
    async fn fetch(&self, period: &ReportPeriod) -> Result<String>;
}

/// Fetches and parses the records for `period`.
pub async fn load_records(
    source: &dyn CsvSource,
    period: &ReportPeriod,
) -> Result<Vec<AttendanceRecord>> {
    info!("Fetching attendance export for {}", period);
    let text = source.fetch(period).await?;
    parse_records(&text)
}

// --- Local Directory ---

/// Reads `dados_{month}_{year}.csv` from a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, period: &ReportPeriod) -> PathBuf {
        self.root.join(period.csv_file_name())
    }
}

#[async_trait]
impl CsvSource for DirectorySource {
    async fn fetch(&self, period: &ReportPeriod) -> Result<String> {
        let path = self.path_for(period);
        debug!("Reading export from {:?}", path);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("No export at {:?}", path);
                Err(ReportError::source_unavailable(period.month(), period.year()))
            }
            Err(e) => Err(ReportError::Transport(format!("{:?}: {}", path, e))),
        }
    }
}

// --- HTTP ---

/// Fetches `{base_url}/data/dados_{month}_{year}.csv`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http_client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ReportError::Transport(format!("URL inválida '{}': {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http_client: Client::new(),
            base_url,
        })
    }

    pub fn url_for(&self, period: &ReportPeriod) -> Result<Url> {
        self.base_url
            .join(&format!("data/{}", period.csv_file_name()))
            .map_err(|e| ReportError::Transport(e.to_string()))
    }
}

#[async_trait]
impl CsvSource for HttpSource {
    async fn fetch(&self, period: &ReportPeriod) -> Result<String> {
        let url = self.url_for(period)?;
        debug!("GET {}", url);
        let response = self.http_client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Export request to {} returned {}", url, status);
            return Err(ReportError::source_unavailable(period.month(), period.year()));
        }

        Ok(response.text().await?)
    }
}

// --- In-Memory ---

/// Fixed set of exports keyed by period; used when data is already loaded.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    exports: HashMap<ReportPeriod, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export(mut self, period: ReportPeriod, csv_text: impl Into<String>) -> Self {
        self.exports.insert(period, csv_text.into());
        self
    }
}

#[async_trait]
impl CsvSource for MemorySource {
    async fn fetch(&self, period: &ReportPeriod) -> Result<String> {
        self.exports
            .get(period)
            .cloned()
            .ok_or_else(|| ReportError::source_unavailable(period.month(), period.year()))
    }
}
