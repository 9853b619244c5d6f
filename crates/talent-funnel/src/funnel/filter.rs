use super::domain::{EventRow, ReportError};
use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Sentinel values the position selector uses for "no filter".
const ALL_POSITIONS: [&str; 2] = ["Todas", "All"];

/// Inclusive date range for one evaluation pass. Construction fails when the
/// bounds are inverted; the range is never silently widened or defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Reporting periods offered by the dashboard selector, each a lookback
/// window ending at the latest data date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Week,
    Month,
    ThreeMonths,
    Year,
}

impl ReportPeriod {
    pub const fn ordered() -> [Self; 4] {
        [Self::Week, Self::Month, Self::ThreeMonths, Self::Year]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Week => "Week",
            Self::Month => "Month",
            Self::ThreeMonths => "3 Months",
            Self::Year => "Year",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "week" | "semana" => Some(Self::Week),
            "month" | "mes" => Some(Self::Month),
            "three_months" | "3_months" | "3 meses" | "3m" => Some(Self::ThreeMonths),
            "year" | "año" | "ano" => Some(Self::Year),
            _ => None,
        }
    }

    /// Window ending at `latest`; the week is a plain 7-day offset while the
    /// longer periods are calendar-month accurate.
    pub fn window_ending(self, latest: NaiveDate) -> DateRange {
        let start = match self {
            Self::Week => latest - Duration::days(7),
            Self::Month => latest
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN),
            Self::ThreeMonths => latest
                .checked_sub_months(Months::new(3))
                .unwrap_or(NaiveDate::MIN),
            Self::Year => latest
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN),
        };

        DateRange { start, end: latest }
    }
}

/// Maps the selector's raw position choice to an effective filter, treating
/// the "Todas"/"All" sentinel as unfiltered.
pub fn position_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .filter(|value| {
            !ALL_POSITIONS
                .iter()
                .any(|sentinel| sentinel.eq_ignore_ascii_case(value))
        })
}

/// Subset of rows inside the range and, when given, matching the position.
/// Preserves input order; filtering an already-filtered set with the same
/// bounds returns the same set.
pub fn filter_rows(rows: &[EventRow], range: DateRange, position: Option<&str>) -> Vec<EventRow> {
    rows.iter()
        .filter(|row| range.contains(row.date))
        .filter(|row| position.map_or(true, |wanted| row.position == wanted))
        .cloned()
        .collect()
}
