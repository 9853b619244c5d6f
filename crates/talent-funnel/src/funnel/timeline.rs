use super::domain::{EventRow, OpenState};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Derived facts for one position: its earliest and most recent rows. The
/// open/closed state comes from the latest row only; the earliest row carries
/// the initial sourcing snapshot the alert engine reads.
#[derive(Debug, Clone)]
pub struct PositionTimeline {
    pub position: String,
    pub first_row: EventRow,
    pub latest_row: EventRow,
}

impl PositionTimeline {
    pub fn opened_on(&self) -> NaiveDate {
        self.first_row.date
    }

    pub fn state(&self) -> OpenState {
        self.latest_row.open_state
    }

    pub fn is_open(&self) -> bool {
        self.state().counts_as_open()
    }

    pub fn business_days_open(&self, today: NaiveDate) -> i64 {
        business_days_between(self.opened_on(), today)
    }
}

/// One timeline per distinct position, ordered alphabetically. Rows sharing
/// the maximum date resolve to the last one in input order.
pub fn build_timelines(rows: &[EventRow]) -> Vec<PositionTimeline> {
    let mut by_position: BTreeMap<String, PositionTimeline> = BTreeMap::new();

    for row in rows {
        match by_position.get_mut(&row.position) {
            None => {
                by_position.insert(
                    row.position.clone(),
                    PositionTimeline {
                        position: row.position.clone(),
                        first_row: row.clone(),
                        latest_row: row.clone(),
                    },
                );
            }
            Some(timeline) => {
                if row.date < timeline.first_row.date {
                    timeline.first_row = row.clone();
                }
                if row.date >= timeline.latest_row.date {
                    timeline.latest_row = row.clone();
                }
            }
        }
    }

    by_position.into_values().collect()
}

/// Signed calendar-day difference from `start` to `end`.
pub fn calendar_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Business days (Mon-Fri, no holiday calendar) in `[start, end)`. A position
/// opened today therefore has zero business days on the clock.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut days = 0;
    let mut current = start;
    while current < end {
        if current.weekday().number_from_monday() <= 5 {
            days += 1;
        }
        current += Duration::days(1);
    }
    days
}
