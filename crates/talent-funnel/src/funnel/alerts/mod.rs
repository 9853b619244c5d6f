mod config;
mod rules;

pub use config::AlertThresholds;

use super::domain::EventRow;
use super::timeline::build_timelines;
use chrono::NaiveDate;
use rules::SourcingSignals;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recommended action for an open position's sourcing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcingAction {
    LaunchJobBoardCampaign,
    MessagingOutreach,
    ProfessionalNetworkCampaign,
    CriticalDirectSourcing,
    SourcingOk,
}

impl SourcingAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LaunchJobBoardCampaign => "Launch Job-Board Campaign",
            Self::MessagingOutreach => "Messaging Outreach",
            Self::ProfessionalNetworkCampaign => "Professional-Network Campaign",
            Self::CriticalDirectSourcing => "Critical: Direct Sourcing",
            Self::SourcingOk => "Sourcing OK",
        }
    }
}

/// One classification per open position per evaluation; recomputed from
/// current data, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcingAlert {
    pub position: String,
    pub business_days_open: i64,
    pub primary_channel_initial: u32,
    pub cumulative_new_candidates: u32,
    pub total_candidates: u32,
    pub action: SourcingAction,
    pub message: String,
}

/// Stateless classifier applying the ordered sourcing rules to every open
/// position.
pub struct SourcingAlertEngine {
    thresholds: AlertThresholds,
}

impl SourcingAlertEngine {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluates the full row-set (openness follows each position's latest
    /// status row) as of `today`. Every open position gets exactly one alert.
    pub fn evaluate(&self, all_rows: &[EventRow], today: NaiveDate) -> Vec<SourcingAlert> {
        let mut cumulative_new: BTreeMap<&str, u32> = BTreeMap::new();
        for row in all_rows {
            *cumulative_new.entry(row.position.as_str()).or_default() +=
                row.counters.new_candidates;
        }

        build_timelines(all_rows)
            .into_iter()
            .filter(|timeline| timeline.is_open())
            .map(|timeline| {
                let signals = SourcingSignals {
                    business_days_open: timeline.business_days_open(today),
                    primary_channel_initial: timeline.first_row.counters.indeed_candidates,
                    cumulative_new_candidates: cumulative_new
                        .get(timeline.position.as_str())
                        .copied()
                        .unwrap_or(0),
                };
                let action = rules::classify(&self.thresholds, &signals);

                SourcingAlert {
                    position: timeline.position,
                    business_days_open: signals.business_days_open,
                    primary_channel_initial: signals.primary_channel_initial,
                    cumulative_new_candidates: signals.cumulative_new_candidates,
                    total_candidates: signals.total_candidates(),
                    message: self.message_for(action, &signals),
                    action,
                }
            })
            .collect()
    }

    fn message_for(&self, action: SourcingAction, signals: &SourcingSignals) -> String {
        match action {
            SourcingAction::LaunchJobBoardCampaign => {
                "Launch a job-board sourcing campaign".to_string()
            }
            SourcingAction::MessagingOutreach => {
                "Recommend a messaging outreach campaign".to_string()
            }
            SourcingAction::ProfessionalNetworkCampaign => {
                "Need a professional-network campaign".to_string()
            }
            SourcingAction::CriticalDirectSourcing => {
                let total = signals.total_candidates();
                let target = self.thresholds.critical_total_below;
                format!(
                    "Critical: {total} candidates, {} short of {target}. Start direct sourcing.",
                    target.saturating_sub(total)
                )
            }
            SourcingAction::SourcingOk => "No alerts: sourcing on track".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::domain::{Counters, OpenState};
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn row(
        date: NaiveDate,
        position: &str,
        open: OpenState,
        indeed: u32,
        new_candidates: u32,
    ) -> EventRow {
        EventRow {
            date,
            position: position.to_string(),
            recruiter: "Ana".to_string(),
            open_state: open,
            counters: Counters {
                indeed_candidates: indeed,
                new_candidates,
                ..Counters::default()
            },
        }
    }

    fn engine() -> SourcingAlertEngine {
        SourcingAlertEngine::new(AlertThresholds::default())
    }

    #[test]
    fn backend_engineer_scenario_needs_network_campaign() {
        // Opened Monday, evaluated the next Monday: 5 business days open.
        // Initial job-board batch of 35, 20 new since: total 55. The
        // job-board rule passes (35 >= 30), outreach passes (55 >= 50),
        // the network rule catches it (55 < 60).
        let opened = date(2024, 5, 6);
        let today = opened + Duration::days(7);
        let rows = vec![
            row(opened, "Backend Engineer", OpenState::Open, 35, 8),
            row(opened + Duration::days(2), "Backend Engineer", OpenState::Open, 0, 12),
        ];

        let alerts = engine().evaluate(&rows, today);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].business_days_open, 5);
        assert_eq!(alerts[0].total_candidates, 55);
        assert_eq!(alerts[0].action, SourcingAction::ProfessionalNetworkCampaign);
    }

    #[test]
    fn position_opened_today_reports_sourcing_ok() {
        let today = date(2024, 5, 6);
        let rows = vec![row(today, "QA", OpenState::Open, 0, 0)];

        let alerts = engine().evaluate(&rows, today);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].business_days_open, 0);
        assert_eq!(alerts[0].action, SourcingAction::SourcingOk);
    }

    #[test]
    fn primary_channel_snapshot_comes_from_first_row_only() {
        let opened = date(2024, 5, 6);
        let rows = vec![
            row(opened, "Data", OpenState::Open, 10, 0),
            // Later Indeed volume does not rewrite the initial snapshot.
            row(opened + Duration::days(1), "Data", OpenState::Open, 90, 0),
        ];

        let alerts = engine().evaluate(&rows, opened + Duration::days(2));
        assert_eq!(alerts[0].primary_channel_initial, 10);
        assert_eq!(alerts[0].action, SourcingAction::LaunchJobBoardCampaign);
    }

    #[test]
    fn closed_positions_are_not_evaluated() {
        let opened = date(2024, 5, 6);
        let rows = vec![
            row(opened, "Ops", OpenState::Open, 0, 0),
            row(opened + Duration::days(3), "Ops", OpenState::Closed, 0, 0),
        ];

        let alerts = engine().evaluate(&rows, opened + Duration::days(10));
        assert!(alerts.is_empty());
    }

    #[test]
    fn every_open_position_gets_exactly_one_alert() {
        let opened = date(2024, 5, 6);
        let today = opened + Duration::days(14);
        let rows = vec![
            row(opened, "Backend", OpenState::Open, 100, 100),
            row(opened, "QA", OpenState::Open, 5, 0),
            row(opened, "Data", OpenState::Unknown, 40, 30),
        ];

        let alerts = engine().evaluate(&rows, today);
        assert_eq!(alerts.len(), 3);
        let positions: Vec<_> = alerts.iter().map(|alert| alert.position.as_str()).collect();
        assert_eq!(positions, ["Backend", "Data", "QA"]);
    }

    #[test]
    fn critical_message_reports_the_shortfall() {
        let opened = date(2024, 5, 6);
        // 5 business days later, primary 60, no new candidates: total 60.
        let today = opened + Duration::days(7);
        let rows = vec![row(opened, "Backend", OpenState::Open, 60, 0)];

        let alerts = engine().evaluate(&rows, today);
        assert_eq!(alerts[0].action, SourcingAction::CriticalDirectSourcing);
        assert_eq!(
            alerts[0].message,
            "Critical: 60 candidates, 20 short of 80. Start direct sourcing."
        );
    }
}
