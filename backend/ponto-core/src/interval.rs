// src/interval.rs
use serde::Serialize;
use tracing::debug;

use crate::record::DayPunch;

pub const PLACEHOLDER: &str = "-";

// --- Punch Parsing ---

/// Result of reading one clock punch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunchTime {
    /// Minutes since midnight. Not range-checked: "25:70" yields 1570.
    Clock(i64),
    Absent,
    /// Not `H:M`, or too large to count in minutes.
    Unparseable(String),
}

impl PunchTime {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            None | Some("") | Some(PLACEHOLDER) => return PunchTime::Absent,
            Some(value) => value,
        };

        let mut parts = raw.split(':');
        let hours = parts.next().and_then(|h| h.trim().parse::<i64>().ok());
        let minutes = parts.next().and_then(|m| m.trim().parse::<i64>().ok());

        let total = match (hours, minutes) {
            (Some(h), Some(m)) => h.checked_mul(60).and_then(|v| v.checked_add(m)),
            _ => None,
        };
        match total {
            Some(minutes) => PunchTime::Clock(minutes),
            None => PunchTime::Unparseable(raw.to_string()),
        }
    }

    pub fn minutes(&self) -> Option<i64> {
        match self {
            PunchTime::Clock(minutes) => Some(*minutes),
            PunchTime::Absent | PunchTime::Unparseable(_) => None,
        }
    }
}

// --- Day Interval ---

/// One day's worked time for one employee, derived from a [`DayPunch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayInterval {
    pub day: u8,
    pub check_in: String,
    pub check_out: String,
    pub worked_minutes: Option<i64>,
}

impl DayInterval {
    /// Computes the interval for `day`. Overnight spans (check-out before
    /// check-in) and zero-length spans count as no data.
    pub fn compute(day: u8, punch: &DayPunch) -> Self {
        let check_in = PunchTime::parse(punch.check_in.as_deref());
        let check_out = PunchTime::parse(punch.check_out.as_deref());

        for unparseable in [&check_in, &check_out] {
            if let PunchTime::Unparseable(raw) = unparseable {
                debug!("Day {}: ignoring unparseable punch time '{}'", day, raw);
            }
        }

        let worked_minutes = match (check_in.minutes(), check_out.minutes()) {
            (Some(start), Some(end)) if end > start => end.checked_sub(start),
            _ => None,
        };

        Self {
            day,
            check_in: echo(punch.check_in.as_deref()),
            check_out: echo(punch.check_out.as_deref()),
            worked_minutes,
        }
    }

    pub fn duration_label(&self) -> String {
        match self.worked_minutes {
            Some(minutes) => format_duration(minutes),
            None => PLACEHOLDER.to_string(),
        }
    }
}

fn echo(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

// --- Monthly Total ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyTotal {
    minutes: i64,
}

impl MonthlyTotal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes `day`'s interval and adds its worked minutes, when defined.
    pub fn accumulate(&mut self, day: u8, punch: &DayPunch) -> DayInterval {
        let interval = DayInterval::compute(day, punch);
        if let Some(minutes) = interval.worked_minutes {
            self.minutes = self.minutes.saturating_add(minutes);
        }
        interval
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn label(&self) -> String {
        format_duration(self.minutes)
    }
}

/// Formats a duration as zero-padded `HH:MM`; hours are not wrapped at 24.
pub fn format_duration(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{:02}:{:02}", hours, minutes)
}
