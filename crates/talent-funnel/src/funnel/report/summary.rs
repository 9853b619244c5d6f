use super::super::alerts::SourcingAlertEngine;
use super::super::domain::EventRow;
use super::super::filter::{self, DateRange};
use super::super::policy::{PaceBands, ReportPolicy};
use super::super::timeline::calendar_days_between;
use super::super::{aggregates, conversion, terna, workload};
use super::views::{FunnelReportSummary, HiringVelocity, PositionElapsedEntry};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Inputs for one evaluation pass. The range is validated at construction
/// (`DateRange::new`), so a report can always be built from it.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub range: DateRange,
    pub position: Option<String>,
    pub today: NaiveDate,
}

/// Runs every aggregator over an immutable snapshot of normalized rows.
/// Workload and sourcing alerts read the full set; everything else reads the
/// filtered window.
pub fn build_report(
    all_rows: &[EventRow],
    params: &ReportParams,
    policy: &ReportPolicy,
) -> FunnelReportSummary {
    let position = filter::position_filter(params.position.as_deref());
    let subset = filter::filter_rows(all_rows, params.range, position);

    FunnelReportSummary {
        range: params.range,
        position_filter: position.map(str::to_string),
        evaluated_on: params.today,
        daily_flow: aggregates::daily_flow(&subset),
        velocity: hiring_velocity(&subset, &policy.pace),
        position_elapsed: position_elapsed(&subset, &policy.pace),
        funnel: aggregates::recruiting_funnel(&subset),
        screening_discards: aggregates::screening_discards(&subset),
        client_discards: aggregates::client_discards(&subset),
        conversion: conversion::conversion_by_position(&subset),
        sourcing_trend: aggregates::daily_sourcing_trend(&subset, &policy.targets),
        workload: workload::recruiter_workload(all_rows, &policy.workload),
        sourcing_alerts: SourcingAlertEngine::new(policy.alerts).evaluate(all_rows, params.today),
        terna: terna::terna_activity(&subset),
    }
}

/// Window opening (earliest row) to most recent hire event, calendar days.
fn hiring_velocity(subset: &[EventRow], pace: &PaceBands) -> HiringVelocity {
    let Some(opened_on) = subset.iter().map(|row| row.date).min() else {
        return HiringVelocity::NoData;
    };

    let last_hire_on = subset
        .iter()
        .filter(|row| row.counters.hired > 0)
        .map(|row| row.date)
        .max();

    match last_hire_on {
        None => HiringVelocity::NoHires { opened_on },
        Some(last_hire_on) => {
            let days = calendar_days_between(opened_on, last_hire_on);
            HiringVelocity::Measured {
                opened_on,
                last_hire_on,
                days,
                pace: pace.classify(days),
            }
        }
    }
}

/// Per position: opening date and calendar days to the FIRST hire event.
fn position_elapsed(subset: &[EventRow], pace: &PaceBands) -> Vec<PositionElapsedEntry> {
    let mut facts: BTreeMap<&str, (NaiveDate, Option<NaiveDate>)> = BTreeMap::new();
    for row in subset {
        let entry = facts
            .entry(row.position.as_str())
            .or_insert((row.date, None));
        if row.date < entry.0 {
            entry.0 = row.date;
        }
        if row.counters.hired > 0 && entry.1.map_or(true, |hired_on| row.date < hired_on) {
            entry.1 = Some(row.date);
        }
    }

    facts
        .into_iter()
        .map(|(position, (opened_on, first_hire_on))| {
            let days_to_first_hire =
                first_hire_on.map(|hired_on| calendar_days_between(opened_on, hired_on));
            PositionElapsedEntry {
                position: position.to_string(),
                opened_on,
                days_to_first_hire,
                pace: days_to_first_hire.map(|days| pace.classify(days)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::domain::{Counters, OpenState};
    use crate::funnel::policy::PaceBand;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn row(date: NaiveDate, position: &str, hired: u32) -> EventRow {
        EventRow {
            date,
            position: position.to_string(),
            recruiter: "Ana".to_string(),
            open_state: OpenState::Open,
            counters: Counters {
                hired,
                ..Counters::default()
            },
        }
    }

    fn params(start: NaiveDate, end: NaiveDate) -> ReportParams {
        ReportParams {
            range: DateRange::new(start, end).expect("valid range"),
            position: None,
            today: end,
        }
    }

    #[test]
    fn empty_window_reports_no_data_everywhere() {
        let rows = vec![row(date(2024, 1, 5), "Backend", 1)];
        let report = build_report(
            &rows,
            &params(date(2024, 5, 1), date(2024, 5, 31)),
            &ReportPolicy::default(),
        );

        assert_eq!(report.velocity, HiringVelocity::NoData);
        assert!(report.daily_flow.is_empty());
        assert!(report.position_elapsed.is_empty());
        assert!(report.funnel.is_empty());
        assert!(report.conversion.is_empty());
        assert!(report.terna.is_empty());
        // Workload still reflects the full data set.
        assert_eq!(report.workload.len(), 1);
    }

    #[test]
    fn velocity_measures_opening_to_latest_hire() {
        let rows = vec![
            row(date(2024, 5, 1), "Backend", 0),
            row(date(2024, 5, 10), "Backend", 1),
            row(date(2024, 5, 20), "QA", 1),
        ];

        let report = build_report(
            &rows,
            &params(date(2024, 5, 1), date(2024, 5, 31)),
            &ReportPolicy::default(),
        );

        match report.velocity {
            HiringVelocity::Measured {
                days,
                pace,
                opened_on,
                last_hire_on,
            } => {
                assert_eq!(opened_on, date(2024, 5, 1));
                assert_eq!(last_hire_on, date(2024, 5, 20));
                assert_eq!(days, 19);
                assert_eq!(pace, PaceBand::Watch);
            }
            other => panic!("expected measured velocity, got {other:?}"),
        }
    }

    #[test]
    fn velocity_without_hires_is_explicit() {
        let rows = vec![row(date(2024, 5, 3), "Backend", 0)];
        let report = build_report(
            &rows,
            &params(date(2024, 5, 1), date(2024, 5, 31)),
            &ReportPolicy::default(),
        );

        assert_eq!(
            report.velocity,
            HiringVelocity::NoHires {
                opened_on: date(2024, 5, 3)
            }
        );
    }

    #[test]
    fn position_elapsed_uses_first_hire_event() {
        let rows = vec![
            row(date(2024, 5, 1), "Backend", 0),
            row(date(2024, 5, 8), "Backend", 1),
            row(date(2024, 5, 25), "Backend", 1),
            row(date(2024, 5, 2), "QA", 0),
        ];

        let report = build_report(
            &rows,
            &params(date(2024, 5, 1), date(2024, 5, 31)),
            &ReportPolicy::default(),
        );

        assert_eq!(report.position_elapsed.len(), 2);
        let backend = &report.position_elapsed[0];
        assert_eq!(backend.days_to_first_hire, Some(7));
        assert_eq!(backend.pace, Some(PaceBand::Fast));

        let qa = &report.position_elapsed[1];
        assert_eq!(qa.days_to_first_hire, None);
        assert_eq!(qa.pace, None);
    }

    #[test]
    fn position_filter_narrows_window_sections_only() {
        let rows = vec![
            row(date(2024, 5, 1), "Backend", 1),
            row(date(2024, 5, 2), "QA", 1),
        ];

        let mut report_params = params(date(2024, 5, 1), date(2024, 5, 31));
        report_params.position = Some("Backend".to_string());
        let report = build_report(&rows, &report_params, &ReportPolicy::default());

        assert_eq!(report.position_elapsed.len(), 1);
        assert_eq!(report.position_filter.as_deref(), Some("Backend"));
        // Alerts keep evaluating every open position.
        assert_eq!(report.sourcing_alerts.len(), 2);
    }

    #[test]
    fn todas_sentinel_reports_all_positions() {
        let rows = vec![
            row(date(2024, 5, 1), "Backend", 0),
            row(date(2024, 5, 2), "QA", 0),
        ];

        let mut report_params = params(date(2024, 5, 1), date(2024, 5, 31));
        report_params.position = Some("Todas".to_string());
        let report = build_report(&rows, &report_params, &ReportPolicy::default());

        assert_eq!(report.position_elapsed.len(), 2);
        assert!(report.position_filter.is_none());
    }
}
