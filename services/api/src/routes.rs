use crate::infra::{default_report_policy, deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use talent_funnel::config::SourceConfig;
use talent_funnel::error::AppError;
use talent_funnel::funnel::domain::{EventRow, ReportError};
use talent_funnel::funnel::{
    build_report, DateRange, FunnelReportSummary, ReportParams, ReportPeriod,
};
use talent_funnel::sheets::{HttpSheetClient, SheetImportError, SheetImporter};

#[derive(Debug, Deserialize)]
pub(crate) struct FunnelReportRequest {
    /// Inline CSV payload, handy for tests and uploads.
    #[serde(default)]
    pub(crate) csv: Option<String>,
    /// Export URL; falls back to the configured SHEET_URL.
    #[serde(default)]
    pub(crate) source_url: Option<String>,
    #[serde(default)]
    pub(crate) period: Option<ReportPeriod>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) end: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) position: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FunnelReportResponse {
    pub(crate) data_source: ReportDataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) period: Option<ReportPeriod>,
    pub(crate) summary: FunnelReportSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReportDataSource {
    Inline,
    Remote,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/funnel/report", post(funnel_report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn funnel_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<FunnelReportRequest>,
) -> Result<Json<FunnelReportResponse>, AppError> {
    compute_report(&state.source, payload).await.map(Json)
}

/// One evaluation pass: load rows, resolve the window, run every aggregator.
/// Any failure aborts the pass; no partial report is ever returned.
pub(crate) async fn compute_report(
    source: &SourceConfig,
    payload: FunnelReportRequest,
) -> Result<FunnelReportResponse, AppError> {
    let FunnelReportRequest {
        csv,
        source_url,
        period,
        start,
        end,
        position,
        today,
    } = payload;

    let (rows, data_source) = load_rows(source, csv, source_url).await?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let (range, period) = resolve_range(start, end, period, &rows, today)?;
    let params = ReportParams {
        range,
        position,
        today,
    };
    let summary = build_report(&rows, &params, &default_report_policy());

    Ok(FunnelReportResponse {
        data_source,
        period,
        summary,
    })
}

async fn load_rows(
    source: &SourceConfig,
    csv: Option<String>,
    source_url: Option<String>,
) -> Result<(Vec<EventRow>, ReportDataSource), AppError> {
    if let Some(csv) = csv {
        let rows = SheetImporter::from_reader(Cursor::new(csv.into_bytes()))?;
        return Ok((rows, ReportDataSource::Inline));
    }

    let url = source_url
        .or_else(|| source.sheet_url.clone())
        .ok_or(AppError::MissingSource)?;
    let timeout = source.timeout;

    let rows = tokio::task::spawn_blocking(move || -> Result<Vec<EventRow>, SheetImportError> {
        let gateway = HttpSheetClient::with_timeout(timeout)?;
        SheetImporter::from_url(&gateway, &url)
    })
    .await
    .map_err(|err| AppError::Server(axum::Error::new(err)))??;

    Ok((rows, ReportDataSource::Remote))
}

/// An explicit start/end pair wins over the period selector; giving only one
/// bound is rejected rather than silently widened. With neither, the period
/// (default: week, like the dashboard selector) ends at the latest data date.
pub(crate) fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    period: Option<ReportPeriod>,
    rows: &[EventRow],
    today: NaiveDate,
) -> Result<(DateRange, Option<ReportPeriod>), AppError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok((DateRange::new(start, end)?, None)),
        (None, None) => {
            let period = period.unwrap_or(ReportPeriod::Week);
            let latest = rows.iter().map(|row| row.date).max().unwrap_or(today);
            Ok((period.window_ending(latest), Some(period)))
        }
        _ => Err(AppError::Report(ReportError::IncompleteDateRange)),
    }
}
