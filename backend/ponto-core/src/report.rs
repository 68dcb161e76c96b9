// src/report.rs
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::assembler::ReportAssembler;
use crate::document::{DocumentWriter, DEFAULT_FILE_NAME};
use crate::error::Result;
use crate::layout::PageGeometry;
use crate::period::ReportPeriod;
use crate::source::{load_records, CsvSource};
use crate::surface::{DocumentSurface, RecordingSurface};

/// A rendered report that has not been written anywhere yet.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReport {
    pub period: ReportPeriod,
    pub employee_count: usize,
    pub document: RecordingSurface,
}

impl GeneratedReport {
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedReport {
    pub path: PathBuf,
    pub employee_count: usize,
    pub page_count: usize,
    pub digest: String,
}

/// Runs fetch → parse → assemble → layout → render → export for one period.
/// Each call owns its records, totals and surface.
#[derive(Clone)]
pub struct ReportGenerator {
    source: Arc<dyn CsvSource>,
    assembler: ReportAssembler,
    geometry: PageGeometry,
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(source: Arc<dyn CsvSource>, assembler: ReportAssembler) -> Self {
        Self {
            source,
            assembler,
            geometry: PageGeometry::default(),
            output_dir: PathBuf::from("."),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn source(&self) -> &dyn CsvSource {
        self.source.as_ref()
    }

    /// Builds the document in memory. Fails before any page is drawn when the
    /// export is missing or a row is malformed.
    pub async fn build(
        &self,
        period: &ReportPeriod,
        generated_at: DateTime<Local>,
    ) -> Result<GeneratedReport> {
        let records = load_records(self.source.as_ref(), period).await?;

        let sections = self.assembler.assemble(&records, period);
        let writer = DocumentWriter::new(self.geometry, generated_at);
        let document = writer.finalize(sections, records.len(), period);

        Ok(GeneratedReport {
            period: period.clone(),
            employee_count: records.len(),
            document,
        })
    }

    /// Builds the report and writes it under `file_name` (default
    /// `detalhes-funcionarios.json`) inside the output directory.
    pub async fn generate(
        &self,
        period: &ReportPeriod,
        file_name: Option<&str>,
    ) -> Result<ExportedReport> {
        let report = match self.build(period, Local::now()).await {
            Ok(report) => report,
            Err(e) => {
                error!("Erro ao exportar detalhes para {}: {}", period, e);
                return Err(e);
            }
        };

        let path = self
            .output_dir
            .join(file_name.filter(|f| !f.trim().is_empty()).unwrap_or(DEFAULT_FILE_NAME));
        let path = DocumentWriter::export(&report.document, &path)?;
        let digest = report.document.content_digest();

        info!(
            "Report for {} ready: {} employees, {} pages, sha256 {}",
            period,
            report.employee_count,
            report.page_count(),
            digest
        );

        Ok(ExportedReport {
            path,
            employee_count: report.employee_count,
            page_count: report.page_count(),
            digest,
        })
    }
}
