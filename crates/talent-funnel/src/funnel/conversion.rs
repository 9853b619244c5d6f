use super::domain::EventRow;
use serde::Serialize;
use std::collections::BTreeMap;

/// Viable-to-hired conversion for one position. Positions with a zero rate
/// stay in the output; dropping them is a presentation decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionEntry {
    pub position: String,
    pub viable: u64,
    pub hired: u64,
    pub rate_pct: f64,
}

/// Hired/viable ratio per position, as a percentage. A zero viable sum yields
/// a rate of exactly 0 rather than a division error.
pub fn conversion_by_position(rows: &[EventRow]) -> Vec<ConversionEntry> {
    let mut sums: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.position.clone()).or_default();
        entry.0 += u64::from(row.counters.viable_candidates);
        entry.1 += u64::from(row.counters.hired);
    }

    sums.into_iter()
        .map(|(position, (viable, hired))| {
            let rate_pct = if viable == 0 {
                0.0
            } else {
                hired as f64 / viable as f64 * 100.0
            };
            ConversionEntry {
                position,
                viable,
                hired,
                rate_pct,
            }
        })
        .collect()
}
