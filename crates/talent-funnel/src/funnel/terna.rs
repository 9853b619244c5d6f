use super::domain::EventRow;
use super::timeline::business_days_between;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One shortlist ("terna") submission: a row where the terna counter is
/// positive, offset in business days from the position's opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TernaSubmission {
    pub date: NaiveDate,
    pub business_days_from_opening: i64,
    pub candidates: u32,
}

/// Submission history for one position, feeding the scatter chart: offset on
/// one axis, position on the other, submission size as the third dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionTernaActivity {
    pub position: String,
    pub total_submissions: usize,
    pub total_candidates: u64,
    pub submissions: Vec<TernaSubmission>,
}

/// Per-position terna events ordered by date ascending. The opening date is
/// the position's earliest row of any kind, not its earliest submission.
pub fn terna_activity(rows: &[EventRow]) -> Vec<PositionTernaActivity> {
    let mut opened_on: BTreeMap<&str, NaiveDate> = BTreeMap::new();
    for row in rows {
        opened_on
            .entry(row.position.as_str())
            .and_modify(|earliest| {
                if row.date < *earliest {
                    *earliest = row.date;
                }
            })
            .or_insert(row.date);
    }

    let mut by_position: BTreeMap<&str, Vec<&EventRow>> = BTreeMap::new();
    for row in rows {
        if row.counters.terna_submitted > 0 {
            by_position.entry(row.position.as_str()).or_default().push(row);
        }
    }

    by_position
        .into_iter()
        .map(|(position, mut events)| {
            events.sort_by_key(|row| row.date);
            let opening = opened_on[position];

            let submissions: Vec<TernaSubmission> = events
                .into_iter()
                .map(|row| TernaSubmission {
                    date: row.date,
                    business_days_from_opening: business_days_between(opening, row.date),
                    candidates: row.counters.terna_submitted,
                })
                .collect();

            PositionTernaActivity {
                position: position.to_string(),
                total_submissions: submissions.len(),
                total_candidates: submissions
                    .iter()
                    .map(|submission| u64::from(submission.candidates))
                    .sum(),
                submissions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::domain::{Counters, OpenState};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn row(date: NaiveDate, position: &str, terna: u32) -> EventRow {
        EventRow {
            date,
            position: position.to_string(),
            recruiter: "Ana".to_string(),
            open_state: OpenState::Open,
            counters: Counters {
                terna_submitted: terna,
                ..Counters::default()
            },
        }
    }

    #[test]
    fn collects_only_positive_submission_rows() {
        let opened = date(2024, 5, 6);
        let rows = vec![
            row(opened, "Backend", 0),
            row(date(2024, 5, 8), "Backend", 3),
            row(date(2024, 5, 13), "Backend", 2),
        ];

        let activity = terna_activity(&rows);
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].total_submissions, 2);
        assert_eq!(activity[0].total_candidates, 5);
    }

    #[test]
    fn offsets_are_business_days_from_opening() {
        // Opened Monday; submissions Wednesday and the following Monday.
        let rows = vec![
            row(date(2024, 5, 6), "Backend", 0),
            row(date(2024, 5, 8), "Backend", 3),
            row(date(2024, 5, 13), "Backend", 2),
        ];

        let activity = terna_activity(&rows);
        let offsets: Vec<_> = activity[0]
            .submissions
            .iter()
            .map(|submission| submission.business_days_from_opening)
            .collect();
        assert_eq!(offsets, [2, 5]);
    }

    #[test]
    fn submissions_are_ordered_by_date() {
        let rows = vec![
            row(date(2024, 5, 13), "QA", 1),
            row(date(2024, 5, 7), "QA", 4),
        ];

        let activity = terna_activity(&rows);
        assert_eq!(activity[0].submissions[0].candidates, 4);
        assert_eq!(activity[0].submissions[1].candidates, 1);
        assert_eq!(activity[0].submissions[0].business_days_from_opening, 0);
    }

    #[test]
    fn positions_without_submissions_are_omitted() {
        let rows = vec![row(date(2024, 5, 6), "Ops", 0)];
        assert!(terna_activity(&rows).is_empty());
    }
}
