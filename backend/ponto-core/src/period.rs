// src/period.rs
use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::error::{ReportError, Result};

pub const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid year regex"));

/// The (month, year) pair selecting which export is read and which title is printed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReportPeriod {
    month: String,
    year: String,
}

impl ReportPeriod {
    /// Validates and normalizes a period. Month names are matched case-insensitively.
    pub fn new(month: &str, year: &str) -> Result<Self> {
        let month = month.trim().to_lowercase();
        let year = year.trim().to_string();

        if month.is_empty() || year.is_empty() {
            return Err(ReportError::InvalidPeriod(
                "mês e ano devem ser informados".to_string(),
            ));
        }
        if !MONTHS.contains(&month.as_str()) {
            return Err(ReportError::InvalidPeriod(format!("mês desconhecido '{}'", month)));
        }
        if !YEAR_PATTERN.is_match(&year) {
            return Err(ReportError::InvalidPeriod(format!("ano inválido '{}'", year)));
        }

        Ok(Self { month, year })
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            month: MONTHS[date.month0() as usize].to_string(),
            year: format!("{:04}", date.year()),
        }
    }

    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Builds a period from optional parts, falling back to the current month/year.
    pub fn or_current(month: Option<&str>, year: Option<&str>) -> Result<Self> {
        let current = Self::current();
        Self::new(
            month.unwrap_or(current.month.as_str()),
            year.unwrap_or(current.year.as_str()),
        )
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// Export file name for this period, e.g. `dados_fevereiro_2030.csv`.
    pub fn csv_file_name(&self) -> String {
        format!("dados_{}_{}.csv", self.month, self.year)
    }

    /// "Fevereiro/2030"
    pub fn display_name(&self) -> String {
        format!("{}/{}", capitalize(&self.month), self.year)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Years offered by the period selector: five back, four ahead.
pub fn year_options(current_year: i32) -> Vec<String> {
    (current_year - 5..current_year + 5)
        .map(|y| y.to_string())
        .collect()
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
