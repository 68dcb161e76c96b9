// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

// --- Error Types ---

/// Failures that abort a whole report generation.
///
/// Day-level anomalies (unparseable punch times) never show up here; they are
/// carried as [`crate::interval::PunchTime::Unparseable`] and rendered as "-".
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Arquivo não encontrado para {month}/{year}")]
    SourceUnavailable { month: String, year: String },

    #[error("Período inválido: {0}")]
    InvalidPeriod(String),

    #[error("Linha {line} do CSV malformada: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("Falha ao exportar o relatório para {path:?}: {source}")]
    ExportFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Falha ao serializar o relatório: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Falha ao acessar a fonte de dados: {0}")]
    Transport(String),
}

impl ReportError {
    pub fn source_unavailable(month: &str, year: &str) -> Self {
        ReportError::SourceUnavailable {
            month: month.to_string(),
            year: year.to_string(),
        }
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        ReportError::MalformedRow {
            line,
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        ReportError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
