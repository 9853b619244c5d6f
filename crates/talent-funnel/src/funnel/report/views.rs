use super::super::aggregates::{CategoryTotal, DailyFlowPoint, SourcingTrendPoint};
use super::super::alerts::SourcingAlert;
use super::super::conversion::ConversionEntry;
use super::super::filter::DateRange;
use super::super::policy::PaceBand;
use super::super::terna::PositionTernaActivity;
use super::super::workload::RecruiterLoad;
use chrono::NaiveDate;
use serde::Serialize;

/// Hiring velocity over the selected window: opening of the earliest
/// position row to the most recent hire event. Missing data is reported
/// explicitly instead of fabricating a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HiringVelocity {
    NoData,
    NoHires {
        opened_on: NaiveDate,
    },
    Measured {
        opened_on: NaiveDate,
        last_hire_on: NaiveDate,
        days: i64,
        pace: PaceBand,
    },
}

/// Elapsed-time row for one position: opening date and calendar days to its
/// first hire event. Positions without a hire keep their row with no day
/// count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionElapsedEntry {
    pub position: String,
    pub opened_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_first_hire: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<PaceBand>,
}

/// Everything one evaluation pass produces, ready for whatever renders it.
/// Workload and sourcing alerts reflect the full data set; the remaining
/// sections cover the filtered window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelReportSummary {
    pub range: DateRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_filter: Option<String>,
    pub evaluated_on: NaiveDate,
    pub daily_flow: Vec<DailyFlowPoint>,
    pub velocity: HiringVelocity,
    pub position_elapsed: Vec<PositionElapsedEntry>,
    pub funnel: Vec<CategoryTotal>,
    pub screening_discards: Vec<CategoryTotal>,
    pub client_discards: Vec<CategoryTotal>,
    pub conversion: Vec<ConversionEntry>,
    pub sourcing_trend: Vec<SourcingTrendPoint>,
    pub workload: Vec<RecruiterLoad>,
    pub sourcing_alerts: Vec<SourcingAlert>,
    pub terna: Vec<PositionTernaActivity>,
}
