pub mod config;
pub mod error;
pub mod funnel;
pub mod sheets;
pub mod telemetry;
