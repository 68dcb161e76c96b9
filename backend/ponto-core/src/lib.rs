// src/lib.rs
pub mod assembler;
pub mod config;
pub mod document;
pub mod error;
pub mod interval;
pub mod layout;
pub mod period;
pub mod record;
pub mod report;
pub mod server;
pub mod source;
pub mod surface;

#[cfg(test)]
mod interval_tests;
#[cfg(test)]
mod layout_tests;

pub use assembler::{InstitutionHeader, ReportAssembler};
pub use config::Config;
pub use document::{DocumentWriter, DEFAULT_FILE_NAME};
pub use error::ReportError;
pub use interval::{format_duration, DayInterval, MonthlyTotal, PunchTime};
pub use period::ReportPeriod;
pub use record::{parse_records, AttendanceRecord, DayPunch};
pub use report::{ExportedReport, GeneratedReport, ReportGenerator};
pub use source::{CsvSource, DirectorySource, HttpSource, MemorySource};
pub use surface::{DocumentSurface, RecordingSurface};
