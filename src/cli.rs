//! CLI interface for quitstat
//!
//! This module defines the command-line interface using clap. Every flag is
//! global so it can be given before or after the subcommand, and the
//! subcommand itself defaults to `status`.
//!
//! # Example
//!
//! ```bash
//! # Summary for the default profile
//! quitstat
//!
//! # Milestone table for another profile, in Berlin time
//! quitstat --profile ./me.json --timezone Europe/Berlin milestones
//!
//! # Evaluate as of a fixed instant, as JSON
//! quitstat status --now 2024-06-01T12:00:00Z --json
//!
//! # Live dashboard
//! quitstat watch
//! ```

use crate::error::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use quitstat_core::types::QuitTimestamp;
use std::path::PathBuf;

/// Track smoke-free time, money saved and health milestones
#[derive(Parser, Debug, Clone)]
#[command(name = "quitstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Profile document to read (defaults to $QUITSTAT_PROFILE, then the
    /// platform config directory)
    #[arg(long, short = 'p', global = true)]
    pub profile: Option<PathBuf>,

    /// Timezone for calendar months and displayed dates (e.g. "Europe/Berlin", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true, env = "QUITSTAT_TZ")]
    pub timezone: Option<String>,

    /// Use UTC (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Evaluate at this instant instead of the current time (RFC 3339 or YYYY-MM-DD)
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The selected subcommand, `status` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Status)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Smoke-free time, savings, next milestone and badge count
    Status,

    /// Progress toward every health milestone
    Milestones,

    /// All achievement badges with their locked or unlocked state
    Achievements,

    /// Cigarettes smoked and money spent before quitting
    Lifetime,

    /// Live dashboard that refreshes until Ctrl+C
    Watch(WatchArgs),
}

/// Arguments for the watch command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WatchArgs {
    /// Fixed refresh interval in seconds (default: every second during the
    /// first hour, then every minute)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

/// Resolve the evaluation instant
///
/// `None` means the current time. Anything else is parsed with the same
/// rules as a stored quit date.
pub fn parse_now(input: Option<&str>) -> Result<DateTime<Utc>> {
    match input {
        None => Ok(Utc::now()),
        Some(value) => QuitTimestamp::parse(value).map(|ts| *ts.inner()),
    }
}
