//! quitstat - Track smoke-free progress from the terminal
//!
//! This library provides functionality to:
//! - Load a habit profile and usage counters from a JSON profile store
//! - Compute elapsed smoke-free time, cigarettes avoided and money saved
//! - Evaluate health milestones and achievement badges
//! - Generate reports in table and JSON formats
//! - Run a live dashboard that refreshes as time passes
//!
//! # Examples
//!
//! ```no_run
//! use quitstat::{
//!     commands::{Report, ReportContext, render_report},
//!     output::get_formatter,
//!     profile_loader::ProfileLoader,
//!     timezone::TimezoneConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> quitstat::Result<()> {
//!     let loaded = ProfileLoader::new(None)?.load().await?;
//!     let context = ReportContext::new(
//!         loaded.profile,
//!         loaded.usage,
//!         chrono::Utc::now(),
//!         TimezoneConfig::default(),
//!     );
//!
//!     let formatter = get_formatter(false);
//!     println!("{}", render_report(Report::Status, &context, formatter.as_ref()));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod live_monitor;
pub mod profile_loader;

// Re-export the engine and terminal modules
pub use quitstat_core::{
    achievements, currency, elapsed, error, metrics, milestones, numeric, refresh, snapshot,
    timezone, types,
};
pub use quitstat_terminal::{dashboard, output};

// Re-export commonly used types
pub use error::{QuitstatError, Result};
pub use types::{HabitProfile, QuitTimestamp, RawHabitProfile, UsageCounters};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
