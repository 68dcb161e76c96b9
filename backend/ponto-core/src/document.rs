// src/document.rs
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::{ReportError, Result};
use crate::layout::{render, Block, Footer, LayoutDriver, PageGeometry, PageSection};
use crate::period::ReportPeriod;
use crate::surface::{DocumentSurface, RecordingSurface, Rgb, TextStyle};

pub const DEFAULT_FILE_NAME: &str = "detalhes-funcionarios.json";
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
}

impl ExportFormat {
    /// `.txt` exports plain text; anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => ExportFormat::Text,
            _ => ExportFormat::Json,
        }
    }
}

// --- Document Writer ---

/// Appends the summary page, lays out and renders every page, and exports
/// the finished surface.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    driver: LayoutDriver,
    generated_at: DateTime<Local>,
}

impl DocumentWriter {
    pub fn new(geometry: PageGeometry, generated_at: DateTime<Local>) -> Self {
        Self {
            driver: LayoutDriver::new(geometry),
            generated_at,
        }
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn summary_section(&self, employee_count: usize, period: &ReportPeriod) -> PageSection {
        let style = TextStyle::new(10.0, Rgb::MUTED);
        let mut section = PageSection::new();
        section
            .push(Block::Spacer(5.0))
            .push(Block::timestamp(
                format!("Documento gerado em: {}", self.timestamp()),
                style,
                10.0,
            ))
            .push(Block::text(
                format!("Total de funcionários: {}", employee_count),
                style,
                10.0,
            ))
            .push(Block::text(
                format!("Período: {}", period.display_name()),
                style,
                10.0,
            ));
        section
    }

    /// Renders the employee sections plus the summary page onto a fresh surface.
    pub fn finalize(
        &self,
        mut sections: Vec<PageSection>,
        employee_count: usize,
        period: &ReportPeriod,
    ) -> RecordingSurface {
        sections.push(self.summary_section(employee_count, period));

        let pages = self.driver.layout(&sections);
        let footer = Footer {
            generated_at: self.timestamp(),
        };

        let mut surface = RecordingSurface::new();
        render(&pages, self.driver.geometry(), &footer, &mut surface);
        info!(
            "Rendered {} pages for {} employees ({})",
            surface.page_count(),
            employee_count,
            period
        );
        surface
    }

    /// Serializes the whole document in memory, then writes it with a single call.
    pub fn export(surface: &RecordingSurface, path: &Path) -> Result<PathBuf> {
        let bytes = match ExportFormat::from_path(path) {
            ExportFormat::Json => serde_json::to_vec_pretty(surface)?,
            ExportFormat::Text => surface.to_plain_text().into_bytes(),
        };

        let to_export_error = |source: std::io::Error| {
            error!("Failed to export report to {:?}: {}", path, source);
            ReportError::ExportFailure {
                path: path.to_path_buf(),
                source,
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(to_export_error)?;
        }
        fs::write(path, bytes).map_err(to_export_error)?;

        info!("Report exported to {:?}", path);
        Ok(path.to_path_buf())
    }
}
