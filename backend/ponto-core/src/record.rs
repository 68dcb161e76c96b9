// src/record.rs
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::interval::{DayInterval, MonthlyTotal};

pub const DAYS_IN_DOMAIN: usize = 31;

// --- Record Model ---

/// Raw punches for one day. Empty strings and "-" are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayPunch {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

/// One employee's attendance for one reporting period, as read from the export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub cpf: String,
    pub registration_number: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub workload: Option<String>,
    #[serde(skip)]
    pub days: [DayPunch; DAYS_IN_DOMAIN],
}

impl AttendanceRecord {
    /// Punches for a 1-based day; `None` outside 1..=31.
    pub fn day(&self, day: u8) -> Option<&DayPunch> {
        (day as usize).checked_sub(1).and_then(|i| self.days.get(i))
    }

    /// Computes all 31 day intervals in order together with their total.
    pub fn intervals(&self) -> (Vec<DayInterval>, MonthlyTotal) {
        let mut total = MonthlyTotal::new();
        let rows = self
            .days
            .iter()
            .enumerate()
            .map(|(i, punch)| total.accumulate(i as u8 + 1, punch))
            .collect();
        (rows, total)
    }

    /// Search used by the employee listing: name or role (case-insensitive), or CPF.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lowered = term.to_lowercase();
        self.name.to_lowercase().contains(&lowered)
            || self.role.to_lowercase().contains(&lowered)
            || self.cpf.contains(term)
    }
}

// --- CSV Parsing ---

/// Header positions resolved once per file. Day columns are looked up by
/// explicit index so records never need string-keyed access afterwards.
struct ColumnIndex {
    cpf: Option<usize>,
    registration_number: Option<usize>,
    name: Option<usize>,
    role: Option<usize>,
    department: Option<usize>,
    workload: Option<usize>,
    check_in: [Option<usize>; DAYS_IN_DOMAIN],
    check_out: [Option<usize>; DAYS_IN_DOMAIN],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |names: &[&str]| position(headers, names);

        let mut check_in = [None; DAYS_IN_DOMAIN];
        let mut check_out = [None; DAYS_IN_DOMAIN];
        for day in 1..=DAYS_IN_DOMAIN {
            let entrada = format!("Dia{}_Entrada", day);
            let saida = format!("Dia{}_Saida", day);
            let saida_accented = format!("Dia{}_Saída", day);
            check_in[day - 1] = find(&[entrada.as_str()]);
            check_out[day - 1] = find(&[saida.as_str(), saida_accented.as_str()]);
        }

        Self {
            cpf: find(&["CPF"]),
            registration_number: find(&["Matrícula", "Matricula"]),
            name: find(&["Nome"]),
            role: find(&["Cargo"]),
            department: find(&["Lotação", "Lotacao"]),
            workload: find(&["CargaHoraria", "Carga Horária"]),
            check_in,
            check_out,
        }
    }

    fn text(row: &StringRecord, idx: Option<usize>) -> String {
        idx.and_then(|i| row.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    fn optional(row: &StringRecord, idx: Option<usize>) -> Option<String> {
        idx.and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != "-")
            .map(str::to_string)
    }

    fn record(&self, row: &StringRecord) -> AttendanceRecord {
        let mut days: [DayPunch; DAYS_IN_DOMAIN] = Default::default();
        for (i, punch) in days.iter_mut().enumerate() {
            punch.check_in = Self::optional(row, self.check_in[i]);
            punch.check_out = Self::optional(row, self.check_out[i]);
        }

        AttendanceRecord {
            cpf: Self::text(row, self.cpf),
            registration_number: Self::text(row, self.registration_number),
            name: Self::text(row, self.name),
            role: Self::text(row, self.role),
            department: Self::text(row, self.department),
            workload: Self::optional(row, self.workload),
            days,
        }
    }
}

fn position(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim() == *n))
}

/// Spreadsheet exports use `;` as often as `,`; the header line decides.
fn detect_delimiter(csv_text: &str) -> u8 {
    let header = csv_text.lines().next().unwrap_or_default();
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Parses a monthly export. A structurally broken row (e.g. wrong field
/// count) fails the whole parse; missing columns just leave fields empty.
pub fn parse_records(csv_text: &str) -> Result<Vec<AttendanceRecord>> {
    let delimiter = detect_delimiter(csv_text);
    debug!("Parsing export with delimiter '{}'", delimiter as char);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(csv_text.as_bytes());

    let columns = ColumnIndex::from_headers(reader.headers()?);
    if columns.cpf.is_none() || columns.name.is_none() {
        debug!("CSV header is missing CPF or Nome columns; fields will be empty");
    }

    let mut records = Vec::new();
    // Blank lines never reach here; a row of empty fields is still an employee.
    for row in reader.records() {
        records.push(columns.record(&row?));
    }

    info!("Parsed {} attendance records", records.len());
    Ok(records)
}
