use super::domain::{CounterColumn, EventRow};
use super::policy::SourcingTargets;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Recruiting funnel stages, top of funnel first.
pub const FUNNEL_STAGES: [(&str, CounterColumn); 4] = [
    ("Indeed", CounterColumn::IndeedCandidates),
    ("RCRM", CounterColumn::CrmCandidates),
    ("Viables", CounterColumn::ViableCandidates),
    ("Contratados", CounterColumn::Hired),
];

/// Screening-stage discard reasons.
pub const SCREENING_DISCARDS: [(&str, CounterColumn); 6] = [
    ("Hard Skills", CounterColumn::ScreenOutHardSkills),
    ("Fuera de presupuesto", CounterColumn::ScreenOutBudget),
    ("Soft Skills", CounterColumn::ScreenOutSoftSkills),
    ("Inglés", CounterColumn::ScreenOutEnglish),
    ("No se presentó", CounterColumn::ScreenOutNoShow),
    ("Localidad", CounterColumn::ScreenOutLocation),
];

/// Client-stage discard reasons.
pub const CLIENT_DISCARDS: [(&str, CounterColumn); 5] = [
    ("Química", CounterColumn::ClientOutChemistry),
    ("Inconsistencias", CounterColumn::ClientOutExpertise),
    ("Perfil", CounterColumn::ClientOutProfile),
    ("Inglés", CounterColumn::ClientOutEnglish),
    ("Sobrecalificado", CounterColumn::ClientOutOverqualified),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub label: &'static str,
    pub total: u64,
}

/// Sums each requested column over the subset. Zero-valued labels are
/// dropped: a reason with no occurrences is omitted, not shown as 0%.
pub fn sum_columns(
    rows: &[EventRow],
    spec: &[(&'static str, CounterColumn)],
) -> Vec<CategoryTotal> {
    spec.iter()
        .map(|(label, column)| CategoryTotal {
            label,
            total: rows
                .iter()
                .map(|row| u64::from(row.counters.get(*column)))
                .sum(),
        })
        .filter(|category| category.total > 0)
        .collect()
}

pub fn recruiting_funnel(rows: &[EventRow]) -> Vec<CategoryTotal> {
    sum_columns(rows, &FUNNEL_STAGES)
}

pub fn screening_discards(rows: &[EventRow]) -> Vec<CategoryTotal> {
    sum_columns(rows, &SCREENING_DISCARDS)
}

pub fn client_discards(rows: &[EventRow]) -> Vec<CategoryTotal> {
    sum_columns(rows, &CLIENT_DISCARDS)
}

/// One point of the daily candidate-flow chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyFlowPoint {
    pub date: NaiveDate,
    pub new_candidates: u64,
    pub viable_candidates: u64,
    pub hired: u64,
}

/// New/viable/hired sums per day, date ascending.
pub fn daily_flow(rows: &[EventRow]) -> Vec<DailyFlowPoint> {
    let mut by_date: BTreeMap<NaiveDate, (u64, u64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = by_date.entry(row.date).or_default();
        entry.0 += u64::from(row.counters.new_candidates);
        entry.1 += u64::from(row.counters.viable_candidates);
        entry.2 += u64::from(row.counters.hired);
    }

    by_date
        .into_iter()
        .map(|(date, (new_candidates, viable_candidates, hired))| DailyFlowPoint {
            date,
            new_candidates,
            viable_candidates,
            hired,
        })
        .collect()
}

/// One point of the per-source trend chart: actual sums for the day plus the
/// cumulative targets accumulated over the days elapsed so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcingTrendPoint {
    pub date: NaiveDate,
    pub indeed: u64,
    pub direct_search: u64,
    pub indeed_target: u64,
    pub direct_search_target: u64,
}

pub fn daily_sourcing_trend(
    rows: &[EventRow],
    targets: &SourcingTargets,
) -> Vec<SourcingTrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = by_date.entry(row.date).or_default();
        entry.0 += u64::from(row.counters.indeed_candidates);
        entry.1 += u64::from(row.counters.direct_search);
    }

    by_date
        .into_iter()
        .enumerate()
        .map(|(index, (date, (indeed, direct_search)))| {
            let elapsed = index as u64 + 1;
            SourcingTrendPoint {
                date,
                indeed,
                direct_search,
                indeed_target: targets.indeed_per_day * elapsed,
                direct_search_target: targets.direct_search_per_day * elapsed,
            }
        })
        .collect()
}
