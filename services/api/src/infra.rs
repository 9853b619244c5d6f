use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_funnel::config::SourceConfig;
use talent_funnel::funnel::{ReportPeriod, ReportPolicy};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) source: SourceConfig,
}

/// The dashboard's policy knobs; one place to change thresholds for every
/// surface.
pub(crate) fn default_report_policy() -> ReportPolicy {
    ReportPolicy::default()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_period(raw: &str) -> Result<ReportPeriod, String> {
    ReportPeriod::parse(raw)
        .ok_or_else(|| format!("unknown period '{raw}' (use week, month, three_months, or year)"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
