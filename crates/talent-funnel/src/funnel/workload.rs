use super::domain::EventRow;
use super::policy::{LoadBand, WorkloadBands};
use super::timeline::build_timelines;
use serde::Serialize;
use std::collections::BTreeMap;

/// Current open-position load for one recruiter. Ownership of a position
/// follows its latest status row, so every position appears in at most one
/// recruiter's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecruiterLoad {
    pub recruiter: String,
    pub open_positions: usize,
    pub positions: Vec<String>,
    pub band: LoadBand,
}

/// Workload reflects current state, so this always receives the FULL
/// normalized row-set, never the period-filtered subset.
pub fn recruiter_workload(all_rows: &[EventRow], bands: &WorkloadBands) -> Vec<RecruiterLoad> {
    let mut by_recruiter: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for timeline in build_timelines(all_rows) {
        if !timeline.is_open() {
            continue;
        }
        by_recruiter
            .entry(timeline.latest_row.recruiter.clone())
            .or_default()
            .push(timeline.position);
    }

    by_recruiter
        .into_iter()
        .map(|(recruiter, positions)| RecruiterLoad {
            recruiter,
            open_positions: positions.len(),
            band: bands.classify(positions.len()),
            positions,
        })
        .collect()
}
