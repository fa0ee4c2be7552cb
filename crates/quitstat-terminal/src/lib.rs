//! Terminal output formatting for quitstat
//!
//! This crate provides table and JSON output formatters and the live
//! progress dashboard used by `quitstat watch`.

pub mod dashboard;
pub mod output;

pub use dashboard::ProgressDashboard;
pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
