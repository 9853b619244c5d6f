use serde::{Deserialize, Serialize};

/// Thresholds for the sourcing rule set. Day and candidate cutoffs are kept
/// per rule because the rules are evaluated in order, not as a monotone
/// table: rule one can stop matching while a later rule still fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub job_board_days: i64,
    pub job_board_primary_below: u32,
    pub outreach_days: i64,
    pub outreach_total_below: u32,
    pub network_days: i64,
    pub network_total_below: u32,
    pub critical_days: i64,
    pub critical_total_below: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            job_board_days: 1,
            job_board_primary_below: 30,
            outreach_days: 3,
            outreach_total_below: 50,
            network_days: 4,
            network_total_below: 60,
            critical_days: 5,
            critical_total_below: 80,
        }
    }
}
