use super::alerts::AlertThresholds;
use serde::{Deserialize, Serialize};

/// Pace classification for elapsed hiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceBand {
    Fast,
    Watch,
    Slow,
}

impl PaceBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Watch => "Watch",
            Self::Slow => "Slow",
        }
    }
}

/// Day thresholds for pace classification. The source dashboards disagreed
/// on these numbers; this is the one canonical table, carried as
/// configuration rather than hard-coded at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceBands {
    pub fast_max: i64,
    pub watch_max: i64,
}

impl Default for PaceBands {
    fn default() -> Self {
        Self {
            fast_max: 12,
            watch_max: 20,
        }
    }
}

impl PaceBands {
    pub fn classify(&self, days: i64) -> PaceBand {
        if days <= self.fast_max {
            PaceBand::Fast
        } else if days <= self.watch_max {
            PaceBand::Watch
        } else {
            PaceBand::Slow
        }
    }

    /// The velocity banner treats anything past the fast band as slow.
    pub fn is_slow(&self, days: i64) -> bool {
        days > self.fast_max
    }
}

/// Recruiter load classification used by the workload chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBand {
    Normal,
    Elevated,
    High,
}

impl LoadBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadBands {
    pub elevated_at: usize,
    pub high_above: usize,
}

impl Default for WorkloadBands {
    fn default() -> Self {
        Self {
            elevated_at: 3,
            high_above: 5,
        }
    }
}

impl WorkloadBands {
    pub fn classify(&self, open_positions: usize) -> LoadBand {
        if open_positions > self.high_above {
            LoadBand::High
        } else if open_positions >= self.elevated_at {
            LoadBand::Elevated
        } else {
            LoadBand::Normal
        }
    }
}

/// Daily sourcing goals plotted as cumulative target lines next to the
/// per-source trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcingTargets {
    pub indeed_per_day: u64,
    pub direct_search_per_day: u64,
}

impl Default for SourcingTargets {
    fn default() -> Self {
        Self {
            indeed_per_day: 10,
            direct_search_per_day: 2,
        }
    }
}

/// Every product-policy knob the report consults, in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPolicy {
    pub pace: PaceBands,
    pub workload: WorkloadBands,
    pub targets: SourcingTargets,
    pub alerts: AlertThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pace_bands_split_at_configured_days() {
        let bands = PaceBands::default();
        assert_eq!(bands.classify(0), PaceBand::Fast);
        assert_eq!(bands.classify(12), PaceBand::Fast);
        assert_eq!(bands.classify(13), PaceBand::Watch);
        assert_eq!(bands.classify(20), PaceBand::Watch);
        assert_eq!(bands.classify(21), PaceBand::Slow);
        assert!(!bands.is_slow(12));
        assert!(bands.is_slow(13));
    }

    #[test]
    fn workload_bands_split_at_configured_load() {
        let bands = WorkloadBands::default();
        assert_eq!(bands.classify(1), LoadBand::Normal);
        assert_eq!(bands.classify(2), LoadBand::Normal);
        assert_eq!(bands.classify(3), LoadBand::Elevated);
        assert_eq!(bands.classify(5), LoadBand::Elevated);
        assert_eq!(bands.classify(6), LoadBand::High);
    }
}
