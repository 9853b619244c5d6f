use crate::infra::{default_report_policy, parse_date, parse_period};
use crate::routes::resolve_range;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::io::Cursor;
use std::path::PathBuf;
use talent_funnel::config::AppConfig;
use talent_funnel::error::AppError;
use talent_funnel::funnel::report::views::{FunnelReportSummary, HiringVelocity};
use talent_funnel::funnel::{build_report, ReportParams, ReportPeriod};
use talent_funnel::sheets::{HttpSheetClient, SheetImportError, SheetImporter};

/// Two weeks of made-up funnel activity, enough to light up every report
/// section without network access.
const SAMPLE_SHEET: &str = "\
Fecha,Posicion,Nombre reclutador,¿Posicion abierta?,Recruitment. Candidatos nuevos,Recruitment. Candidatos Indeed,Recruitment. Busqueda directa,Recruitment. Candidatos R.CRM,Recruitment. Candidatos Viables,Candidatos contratados,Screening. CNV. Perfil no calificado (hard skills),Screening. CNV. Fuera de presupuesto,Screening. CNV. Nivel de ingles,S. Cliente. Quimica personal,S. Cliente. Sobrecalificado,Terna. Candidatos enviados
06/05/2024,Backend Engineer,Ana Sofía,si,6,28,2,3,4,0,2,1,0,0,0,0
07/05/2024,Backend Engineer,Ana Sofía,si,9,0,1,0,3,0,1,0,1,0,0,0
09/05/2024,Backend Engineer,Ana Sofía,si,4,0,0,1,2,0,0,0,0,1,0,3
14/05/2024,Backend Engineer,Ana Sofía,si,0,0,1,0,2,1,0,0,0,0,0,2
06/05/2024,QA Engineer,Luis Mora,si,<5,12,0,0,0,0,0,0,0,0,0,0
08/05/2024,QA Engineer,Luis Mora,si,3,0,0,0,1,0,1,0,0,0,0,0
13/05/2024,QA Engineer,Luis Mora,si,2,0,1,0,1,0,0,0,0,0,1,0
02/05/2024,Data Analyst,Ana Sofía,si,8,45,0,2,5,1,0,1,0,0,0,4
10/05/2024,Data Analyst,Ana Sofía,NO,0,0,0,0,0,0,0,0,0,0,0,0
08/05/2024,Product Designer,María Torres,si,5,18,1,0,2,0,1,0,0,0,0,0
15/05/2024,Product Designer,María Torres,si,7,0,2,0,3,0,0,1,0,1,0,3
";

/// Pages mirrored from the dashboard's view selector; purely a matter of
/// which sections get printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportView {
    General,
    Evaluation,
    All,
}

impl ReportView {
    fn includes_general(self) -> bool {
        matches!(self, Self::General | Self::All)
    }

    fn includes_evaluation(self) -> bool {
        matches!(self, Self::Evaluation | Self::All)
    }
}

pub(crate) fn parse_view(raw: &str) -> Result<ReportView, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "general" => Ok(ReportView::General),
        "evaluation" => Ok(ReportView::Evaluation),
        "all" => Ok(ReportView::All),
        other => Err(format!(
            "unknown view '{other}' (use general, evaluation, or all)"
        )),
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Local CSV export to read instead of fetching
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Export URL; falls back to the configured SHEET_URL
    #[arg(long)]
    pub(crate) source_url: Option<String>,
    /// Reporting period ending at the latest data date
    #[arg(long, default_value = "week", value_parser = parse_period)]
    pub(crate) period: ReportPeriod,
    /// Explicit window start (YYYY-MM-DD; requires --end)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Explicit window end (YYYY-MM-DD; requires --start)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Position filter ("Todas" or omitted reports every position)
    #[arg(long)]
    pub(crate) position: Option<String>,
    /// Evaluation date for business-day ages (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Which dashboard pages to print
    #[arg(long, default_value = "all", value_parser = parse_view)]
    pub(crate) view: ReportView,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Evaluation date (defaults to the sample's latest data date)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Position filter for the windowed sections
    #[arg(long)]
    pub(crate) position: Option<String>,
    /// Reporting period ending at the latest data date
    #[arg(long, default_value = "month", value_parser = parse_period)]
    pub(crate) period: ReportPeriod,
    /// Which dashboard pages to print
    #[arg(long, default_value = "all", value_parser = parse_view)]
    pub(crate) view: ReportView,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        csv,
        source_url,
        period,
        start,
        end,
        position,
        today,
        view,
    } = args;

    let config = AppConfig::load()?;
    let rows = match csv {
        Some(path) => SheetImporter::from_path(path)?,
        None => {
            let url = source_url
                .or(config.source.sheet_url)
                .ok_or(AppError::MissingSource)?;
            let gateway = HttpSheetClient::with_timeout(config.source.timeout)
                .map_err(SheetImportError::from)?;
            SheetImporter::from_url(&gateway, &url)?
        }
    };

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let (range, period) = resolve_range(start, end, Some(period), &rows, today)?;
    let params = ReportParams {
        range,
        position,
        today,
    };
    let summary = build_report(&rows, &params, &default_report_policy());
    render_report(&summary, period, view);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        position,
        period,
        view,
    } = args;

    let rows = SheetImporter::from_reader(Cursor::new(SAMPLE_SHEET))?;
    let latest = rows
        .iter()
        .map(|row| row.date)
        .max()
        .unwrap_or_else(|| Local::now().date_naive());
    let today = today.unwrap_or(latest);

    println!("Recruiting funnel demo (bundled sample export)");
    let (range, period) = resolve_range(None, None, Some(period), &rows, today)?;
    let params = ReportParams {
        range,
        position,
        today,
    };
    let summary = build_report(&rows, &params, &default_report_policy());
    render_report(&summary, period, view);

    Ok(())
}

fn render_report(summary: &FunnelReportSummary, period: Option<ReportPeriod>, view: ReportView) {
    match period {
        Some(period) => println!(
            "Window: {} -> {} ({}), evaluated {}",
            summary.range.start,
            summary.range.end,
            period.label(),
            summary.evaluated_on
        ),
        None => println!(
            "Window: {} -> {}, evaluated {}",
            summary.range.start, summary.range.end, summary.evaluated_on
        ),
    }

    if let Some(position) = &summary.position_filter {
        println!("Position filter: {position}");
    }

    if view.includes_general() {
        render_general(summary);
    }
    if view.includes_evaluation() {
        render_evaluation(summary);
    }
}

fn render_general(summary: &FunnelReportSummary) {
    println!("\nHiring velocity");
    match &summary.velocity {
        HiringVelocity::NoData => println!("- no openings or hires in the selected window"),
        HiringVelocity::NoHires { opened_on } => {
            println!("- activity since {opened_on}, no hires recorded yet")
        }
        HiringVelocity::Measured {
            opened_on,
            last_hire_on,
            days,
            pace,
        } => println!(
            "- {days} day(s) from opening ({opened_on}) to last hire ({last_hire_on}) [{}]",
            pace.label()
        ),
    }

    if summary.daily_flow.is_empty() {
        println!("\nDaily candidate flow: no data");
    } else {
        println!("\nDaily candidate flow");
        for point in &summary.daily_flow {
            println!(
                "- {}: {} new, {} viable, {} hired",
                point.date, point.new_candidates, point.viable_candidates, point.hired
            );
        }
    }

    if !summary.position_elapsed.is_empty() {
        println!("\nTime per position");
        for entry in &summary.position_elapsed {
            match (entry.days_to_first_hire, entry.pace) {
                (Some(days), Some(pace)) => println!(
                    "- {} | opened {} | first hire after {} day(s) [{}]",
                    entry.position,
                    entry.opened_on,
                    days,
                    pace.label()
                ),
                _ => println!(
                    "- {} | opened {} | no hire yet",
                    entry.position, entry.opened_on
                ),
            }
        }
    }

    if !summary.funnel.is_empty() {
        println!("\nRecruiting funnel");
        for stage in &summary.funnel {
            println!("- {}: {}", stage.label, stage.total);
        }
    }

    if summary.workload.is_empty() {
        println!("\nRecruiter workload: no open positions");
    } else {
        println!("\nRecruiter workload");
        for load in &summary.workload {
            println!(
                "- {}: {} open [{}] ({})",
                load.recruiter,
                load.open_positions,
                load.band.label(),
                load.positions.join(", ")
            );
        }
    }

    if !summary.sourcing_alerts.is_empty() {
        println!("\nSourcing alerts");
        for alert in &summary.sourcing_alerts {
            println!(
                "- {} ({} business day(s) open, {} candidate(s)): {}",
                alert.position, alert.business_days_open, alert.total_candidates, alert.message
            );
        }
    }
}

fn render_evaluation(summary: &FunnelReportSummary) {
    if !summary.sourcing_trend.is_empty() {
        println!("\nDaily sourcing vs targets");
        for point in &summary.sourcing_trend {
            println!(
                "- {}: Indeed {}/{} | direct search {}/{}",
                point.date,
                point.indeed,
                point.indeed_target,
                point.direct_search,
                point.direct_search_target
            );
        }
    }

    if !summary.screening_discards.is_empty() {
        println!("\nScreening discards");
        for reason in &summary.screening_discards {
            println!("- {}: {}", reason.label, reason.total);
        }
    }

    if !summary.client_discards.is_empty() {
        println!("\nClient discards");
        for reason in &summary.client_discards {
            println!("- {}: {}", reason.label, reason.total);
        }
    }

    if !summary.conversion.is_empty() {
        println!("\nViable-to-hired conversion");
        for entry in &summary.conversion {
            if entry.rate_pct > 0.0 {
                println!(
                    "- {}: {:.1}% ({} of {})",
                    entry.position, entry.rate_pct, entry.hired, entry.viable
                );
            }
        }
    }

    if !summary.terna.is_empty() {
        println!("\nShortlist (terna) submissions");
        for activity in &summary.terna {
            println!(
                "- {}: {} submission(s), {} candidate(s)",
                activity.position, activity.total_submissions, activity.total_candidates
            );
            for submission in &activity.submissions {
                println!(
                    "    {} (+{} business day(s)): {} candidate(s)",
                    submission.date, submission.business_days_from_opening, submission.candidates
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_funnel::funnel::ReportPolicy;

    #[test]
    fn sample_sheet_imports_cleanly() {
        let rows = SheetImporter::from_reader(Cursor::new(SAMPLE_SHEET)).expect("sample imports");
        assert_eq!(rows.len(), 11);
    }

    #[test]
    fn sample_demo_report_covers_the_dashboard() {
        let rows = SheetImporter::from_reader(Cursor::new(SAMPLE_SHEET)).expect("sample imports");
        let latest = rows.iter().map(|row| row.date).max().expect("has dates");
        let (range, _) =
            resolve_range(None, None, Some(ReportPeriod::Month), &rows, latest).expect("range");

        let params = ReportParams {
            range,
            position: None,
            today: latest,
        };
        let summary = build_report(&rows, &params, &ReportPolicy::default());

        assert!(!summary.funnel.is_empty());
        assert!(!summary.workload.is_empty());
        assert!(!summary.sourcing_alerts.is_empty());
        assert!(!summary.terna.is_empty());
        assert!(!summary.screening_discards.is_empty());
        assert!(!summary.client_discards.is_empty());
    }

    #[test]
    fn view_parser_accepts_the_three_pages() {
        assert_eq!(parse_view("general"), Ok(ReportView::General));
        assert_eq!(parse_view("Evaluation"), Ok(ReportView::Evaluation));
        assert_eq!(parse_view("all"), Ok(ReportView::All));
        assert!(parse_view("everything").is_err());
    }
}
