//! One-shot report rendering
//!
//! Turns a loaded profile and an evaluation instant into the text printed by
//! the `status`, `milestones`, `achievements` and `lifetime` commands.

use crate::cli::Command;
use chrono::{DateTime, Utc};
use quitstat_core::achievements::AchievementStats;
use quitstat_core::elapsed::ElapsedDuration;
use quitstat_core::metrics::{DerivedMetrics, LifetimeImpact};
use quitstat_core::snapshot::ProgressSnapshot;
use quitstat_core::timezone::TimezoneConfig;
use quitstat_core::types::{HabitProfile, UsageCounters};
use quitstat_terminal::output::OutputFormatter;
use tracing::info;

/// Report types rendered once and printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Status,
    Milestones,
    Achievements,
    Lifetime,
}

impl Report {
    /// Map a CLI command to its report; `None` for the live dashboard
    pub fn from_command(command: &Command) -> Option<Self> {
        match command {
            Command::Status => Some(Report::Status),
            Command::Milestones => Some(Report::Milestones),
            Command::Achievements => Some(Report::Achievements),
            Command::Lifetime => Some(Report::Lifetime),
            Command::Watch(_) => None,
        }
    }
}

/// Everything a report is computed from
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub profile: HabitProfile,
    pub usage: UsageCounters,
    pub now: DateTime<Utc>,
    pub timezone: TimezoneConfig,
}

impl ReportContext {
    pub fn new(
        profile: HabitProfile,
        usage: UsageCounters,
        now: DateTime<Utc>,
        timezone: TimezoneConfig,
    ) -> Self {
        Self {
            profile,
            usage,
            now,
            timezone,
        }
    }

    /// Elapsed time in the configured timezone, `None` without a quit date
    pub fn elapsed(&self) -> Option<ElapsedDuration> {
        quitstat_core::elapsed::compute_elapsed_duration_in(
            self.profile.quit_timestamp(),
            self.now,
            &self.timezone.tz,
        )
    }

    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        ProgressSnapshot::compute(&self.profile, &self.usage, self.now, &self.timezone)
    }

    /// Achievement inputs; without a quit date only the usage counters count
    pub fn achievement_stats(&self) -> AchievementStats {
        match self.elapsed() {
            Some(elapsed) => {
                let metrics = DerivedMetrics::compute(&self.profile, &elapsed).clamped();
                AchievementStats::from_engine(&elapsed, &metrics, &self.usage)
            }
            None => AchievementStats {
                breathing_exercises: self.usage.breathing_exercises,
                coping_strategies_used: self.usage.coping_strategies_used,
                consecutive_days: self.usage.consecutive_days,
                ..Default::default()
            },
        }
    }
}

/// Render `report` with `formatter`
pub fn render_report(
    report: Report,
    context: &ReportContext,
    formatter: &dyn OutputFormatter,
) -> String {
    info!("Rendering {:?} report at {}", report, context.now.to_rfc3339());

    match report {
        Report::Status => match context.snapshot() {
            Some(snapshot) => formatter.format_status(&snapshot, &context.timezone.tz),
            None => formatter.format_no_data(),
        },
        Report::Milestones => match context.elapsed() {
            Some(elapsed) => formatter.format_milestones(elapsed.total_minutes),
            None => formatter.format_no_data(),
        },
        Report::Achievements => formatter.format_achievements(&context.achievement_stats()),
        Report::Lifetime => match LifetimeImpact::compute(&context.profile, context.now) {
            Some(impact) => formatter.format_lifetime(&impact, context.profile.currency()),
            None => formatter.format_no_data(),
        },
    }
}
