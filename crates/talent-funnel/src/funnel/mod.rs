pub mod aggregates;
pub mod alerts;
pub mod conversion;
pub mod domain;
pub mod filter;
pub mod normalizer;
pub mod policy;
pub mod report;
pub mod terna;
pub mod timeline;
pub mod workload;

pub use domain::{CounterColumn, Counters, EventRow, OpenState, ReportError};
pub use filter::{DateRange, ReportPeriod};
pub use policy::ReportPolicy;
pub use report::views::FunnelReportSummary;
pub use report::{build_report, ReportParams};
