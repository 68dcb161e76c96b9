// src/assembler.rs
use tracing::{debug, info};

use crate::interval::PLACEHOLDER;
use crate::layout::{Block, PageSection};
use crate::period::ReportPeriod;
use crate::record::AttendanceRecord;
use crate::surface::{Rgb, TableBlock, TableStyle, TextStyle};

pub const TABLE_HEADING: &str = "Registro de Pontos por Dia";
pub const TABLE_HEAD: [&str; 4] = ["Dia", "Entrada", "Saída", "Carga Horária"];
pub const TOTAL_LABEL: &str = "Total";

// --- Institutional Header ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionHeader {
    pub name: String,
    pub identifier: String,
    pub address: String,
}

impl Default for InstitutionHeader {
    fn default() -> Self {
        Self {
            name: "Prefeitura Municipal de Jaicós".to_string(),
            identifier: "CNPJ: 00.000.000/0001-00".to_string(),
            address: "Praça Central, s/n - Centro - Jaicós/PI".to_string(),
        }
    }
}

// --- Assembler ---

/// Turns records into one page section each, in input order.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    header: InstitutionHeader,
}

impl ReportAssembler {
    pub fn new(header: InstitutionHeader) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &InstitutionHeader {
        &self.header
    }

    pub fn assemble(&self, records: &[AttendanceRecord], period: &ReportPeriod) -> Vec<PageSection> {
        let sections: Vec<PageSection> = records
            .iter()
            .map(|record| self.section_for(record, period))
            .collect();
        info!("Assembled {} employee sections for {}", sections.len(), period);
        sections
    }

    pub fn section_for(&self, record: &AttendanceRecord, period: &ReportPeriod) -> PageSection {
        let muted = TextStyle::new(10.0, Rgb::MUTED);
        let mut section = PageSection::new();

        section
            .push(Block::text(&self.header.name, TextStyle::new(12.0, Rgb::DARK).bold(), 6.0))
            .push(Block::text(&self.header.identifier, TextStyle::new(9.0, Rgb::MUTED), 5.0))
            .push(Block::text(&self.header.address, TextStyle::new(9.0, Rgb::MUTED), 5.0))
            .push(Block::Spacer(4.0))
            .push(Block::text(
                format!("Relatório de Frequência - {}", period.display_name()),
                TextStyle::new(16.0, Rgb::DARK).bold().centered(),
                10.0,
            ));

        for (label, value) in [
            ("Nome", &record.name),
            ("Cargo", &record.role),
            ("Lotação", &record.department),
            ("Matrícula", &record.registration_number),
            ("CPF", &record.cpf),
        ] {
            section.push(Block::text(format!("{}: {}", label, value), muted, 6.0));
        }

        section
            .push(Block::Spacer(4.0))
            .push(Block::heading(TABLE_HEADING, TextStyle::new(12.0, Rgb::DARK), 8.0))
            .push(Block::Table(self.day_table(record)));

        section
    }

    /// 31 day rows followed by the total row.
    pub fn day_table(&self, record: &AttendanceRecord) -> TableBlock {
        let (intervals, total) = record.intervals();

        let mut body: Vec<Vec<String>> = intervals
            .iter()
            .map(|interval| {
                vec![
                    interval.day.to_string(),
                    interval.check_in.clone(),
                    interval.check_out.clone(),
                    interval.duration_label(),
                ]
            })
            .collect();
        body.push(vec![
            TOTAL_LABEL.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            total.label(),
        ]);
        debug!("Employee '{}': monthly total {}", record.name, total.label());

        TableBlock {
            head: TABLE_HEAD.iter().map(|h| h.to_string()).collect(),
            body,
            style: TableStyle {
                font_size: 8.0,
                cell_padding: 1.0,
                column_widths: vec![20.0, 50.0, 50.0, 60.0],
                head_fill: Rgb::HEADER_BLUE,
                head_text: Rgb::WHITE,
                stripe_fill: Rgb::STRIPE,
                bold_last_row: true,
            },
        }
    }
}
