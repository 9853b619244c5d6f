use super::config::AlertThresholds;
use super::SourcingAction;

/// Inputs the rule set reads for one open position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourcingSignals {
    pub business_days_open: i64,
    pub primary_channel_initial: u32,
    pub cumulative_new_candidates: u32,
}

impl SourcingSignals {
    pub(crate) fn total_candidates(&self) -> u32 {
        self.primary_channel_initial + self.cumulative_new_candidates
    }
}

/// Which candidate count a rule compares against its cutoff.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RuleCounter {
    PrimaryChannelInitial,
    TotalCandidates,
}

/// One row of the ordered rule table: fires when the position has been open
/// at least `min_business_days` and the selected counter is below `below`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourcingRule {
    pub min_business_days: i64,
    pub counter: RuleCounter,
    pub below: u32,
    pub action: SourcingAction,
}

impl SourcingRule {
    fn matches(&self, signals: &SourcingSignals) -> bool {
        let counted = match self.counter {
            RuleCounter::PrimaryChannelInitial => signals.primary_channel_initial,
            RuleCounter::TotalCandidates => signals.total_candidates(),
        };
        signals.business_days_open >= self.min_business_days && counted < self.below
    }
}

/// The rule table, most specific first. Order is the policy: evaluation
/// stops at the first match, and the thresholds are deliberately not a
/// strict progression, so reordering changes outcomes.
pub(crate) fn ordered_rules(thresholds: &AlertThresholds) -> [SourcingRule; 4] {
    [
        SourcingRule {
            min_business_days: thresholds.job_board_days,
            counter: RuleCounter::PrimaryChannelInitial,
            below: thresholds.job_board_primary_below,
            action: SourcingAction::LaunchJobBoardCampaign,
        },
        SourcingRule {
            min_business_days: thresholds.outreach_days,
            counter: RuleCounter::TotalCandidates,
            below: thresholds.outreach_total_below,
            action: SourcingAction::MessagingOutreach,
        },
        SourcingRule {
            min_business_days: thresholds.network_days,
            counter: RuleCounter::TotalCandidates,
            below: thresholds.network_total_below,
            action: SourcingAction::ProfessionalNetworkCampaign,
        },
        SourcingRule {
            min_business_days: thresholds.critical_days,
            counter: RuleCounter::TotalCandidates,
            below: thresholds.critical_total_below,
            action: SourcingAction::CriticalDirectSourcing,
        },
    ]
}

/// First-match-wins over the ordered table; no match means sourcing is on
/// track.
pub(crate) fn classify(
    thresholds: &AlertThresholds,
    signals: &SourcingSignals,
) -> SourcingAction {
    ordered_rules(thresholds)
        .into_iter()
        .find(|rule| rule.matches(signals))
        .map(|rule| rule.action)
        .unwrap_or(SourcingAction::SourcingOk)
}
