// src/config.rs
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assembler::{InstitutionHeader, ReportAssembler};
use crate::error::Result;
use crate::report::ReportGenerator;
use crate::source::{CsvSource, DirectorySource, HttpSource};

//=============================================================================
// Configuration
//=============================================================================

/// Settings read from `PONTO_*` environment variables (and `.env`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// When set, exports are fetched over HTTP instead of from `data_dir`.
    pub data_url: Option<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    // Report header overrides
    pub org_name: Option<String>,
    pub org_identifier: Option<String>,
    pub org_address: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            data_url: None,
            output_dir: default_output_dir(),
            server_host: default_server_host(),
            server_port: default_server_port(),
            org_name: None,
            org_identifier: None,
            org_address: None,
        }
    }
}

impl Config {
    pub fn from_env() -> std::result::Result<Self, envy::Error> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        envy::prefixed("PONTO_").from_env::<Config>()
    }

    pub fn institution_header(&self) -> InstitutionHeader {
        let defaults = InstitutionHeader::default();
        InstitutionHeader {
            name: self.org_name.clone().unwrap_or(defaults.name),
            identifier: self.org_identifier.clone().unwrap_or(defaults.identifier),
            address: self.org_address.clone().unwrap_or(defaults.address),
        }
    }

    pub fn csv_source(&self) -> Result<Arc<dyn CsvSource>> {
        Ok(match self.data_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => Arc::new(HttpSource::new(url)?),
            None => Arc::new(DirectorySource::new(self.data_dir.clone())),
        })
    }

    pub fn report_generator(&self) -> Result<ReportGenerator> {
        Ok(
            ReportGenerator::new(self.csv_source()?, ReportAssembler::new(self.institution_header()))
                .with_output_dir(self.output_dir.clone()),
        )
    }
}
