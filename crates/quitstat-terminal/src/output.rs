//! Output formatting for quitstat
//!
//! This module provides formatters for displaying engine results in different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use quitstat_terminal::output::get_formatter;
//! use quitstat_core::{HabitProfile, ProgressSnapshot, QuitTimestamp, UsageCounters};
//! use quitstat_core::timezone::TimezoneConfig;
//! use chrono::{TimeZone, Utc};
//!
//! let quit = QuitTimestamp::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
//! let profile = HabitProfile::new(Some(quit), 20.0, 20.0, 10.0);
//! let now = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();
//! let tz = TimezoneConfig::utc();
//!
//! let snapshot =
//!     ProgressSnapshot::compute(&profile, &UsageCounters::default(), now, &tz).unwrap();
//!
//! // Get table formatter for human-readable output
//! let formatter = get_formatter(false);
//! assert!(formatter.format_status(&snapshot, &tz.tz).contains("$100.00"));
//!
//! // Get JSON formatter for machine-readable output
//! let json_formatter = get_formatter(true);
//! assert!(json_formatter.format_status(&snapshot, &tz.tz).contains("\"money_saved\""));
//! ```

use chrono_tz::Tz;
use prettytable::{Table, format, row};
use quitstat_core::achievements::{ACHIEVEMENTS, AchievementStats};
use quitstat_core::currency::{currency_symbol, format_money};
use quitstat_core::elapsed::ElapsedDuration;
use quitstat_core::metrics::LifetimeImpact;
use quitstat_core::milestones::{HEALTH_MILESTONES, milestone_progress};
use quitstat_core::snapshot::ProgressSnapshot;
use serde_json::{Value, json};

/// Trait for output formatters
///
/// Implementations render engine results for one output channel.
pub trait OutputFormatter {
    /// Format the full progress summary
    fn format_status(&self, snapshot: &ProgressSnapshot, tz: &Tz) -> String;

    /// Format progress toward every health milestone
    fn format_milestones(&self, elapsed_minutes: f64) -> String;

    /// Format the badge table with locked and unlocked state
    fn format_achievements(&self, stats: &AchievementStats) -> String;

    /// Format the cost of the smoking years
    fn format_lifetime(&self, impact: &LifetimeImpact, currency: &str) -> String;

    /// Format the "no quit date recorded" signal
    fn format_no_data(&self) -> String;
}

/// Table formatter for human-readable output
///
/// Counts are shown with thousands separators and money with the currency
/// symbol of the profile.
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_status(&self, snapshot: &ProgressSnapshot, tz: &Tz) -> String {
        let mut output = String::new();
        let symbol = currency_symbol(&snapshot.currency);

        if snapshot.quit_in_future {
            output.push_str(&format!(
                "Quit date is in the future; progress starts in {}\n",
                format_elapsed(&snapshot.elapsed).trim_start_matches('-')
            ));
        }

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Metric", b -> "Value"]);

        table.add_row(row![
            "Quit date",
            snapshot
                .quit_timestamp
                .inner()
                .with_timezone(tz)
                .format("%Y-%m-%d %H:%M:%S %Z")
        ]);
        table.add_row(row!["Smoke-free", format_elapsed(&snapshot.elapsed)]);
        table.add_row(row![
            "Total days",
            r -> format!("{:.2}", snapshot.elapsed.total_days.max(0.0))
        ]);
        table.add_row(row![
            "Cigarettes avoided",
            r -> format_number(snapshot.metrics.whole_cigarettes_avoided())
        ]);
        table.add_row(row![
            "Money saved",
            r -> format_money(symbol, snapshot.metrics.money_saved)
        ]);
        table.add_row(row![
            "Health milestones",
            r -> format!("{} / {}", snapshot.milestones_reached, HEALTH_MILESTONES.len())
        ]);

        let next = match (snapshot.next_milestone, snapshot.minutes_to_next_milestone()) {
            (Some(milestone), Some(remaining)) => format!(
                "{} {} (in {})",
                milestone.icon,
                milestone.description,
                format_minutes(remaining)
            ),
            _ => "All milestones reached".to_string(),
        };
        table.add_row(row!["Next milestone", next]);
        table.add_row(row![
            "Achievements",
            r -> format!(
                "{} / {}",
                snapshot.unlocked_achievements.len(),
                ACHIEVEMENTS.len()
            )
        ]);

        output.push_str(&table.to_string());
        output
    }

    fn format_milestones(&self, elapsed_minutes: f64) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "#",
            b -> "After",
            b -> "Benefit",
            b -> "Progress",
            b -> "Status"
        ]);

        for progress in milestone_progress(elapsed_minutes) {
            let milestone = progress.milestone;
            let status = if progress.is_completed {
                "reached".to_string()
            } else {
                format!(
                    "{} to go",
                    format_minutes(milestone.minutes_remaining(elapsed_minutes))
                )
            };
            table.add_row(row![
                r -> milestone.id,
                milestone.threshold_label(),
                format!("{} {}", milestone.icon, milestone.description),
                r -> format!("{:.1}%", progress.progress_percent),
                status
            ]);
        }

        table.to_string()
    }

    fn format_achievements(&self, stats: &AchievementStats) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Badge",
            b -> "Description",
            b -> "Progress",
            b -> "Status"
        ]);

        for achievement in ACHIEVEMENTS.iter() {
            let status = if achievement.is_unlocked(stats) {
                "unlocked"
            } else {
                "locked"
            };
            table.add_row(row![
                format!("{} {}", achievement.icon, achievement.title),
                achievement.description,
                r -> format!("{:.0}%", achievement.progress_percent(stats)),
                status
            ]);
        }

        table.to_string()
    }

    fn format_lifetime(&self, impact: &LifetimeImpact, currency: &str) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Lifetime impact", b -> "Value"]);
        table.add_row(row![
            "Days as a smoker",
            r -> format_number(impact.days_as_smoker)
        ]);
        table.add_row(row![
            "Cigarettes smoked",
            r -> format_number(impact.cigarettes_smoked.floor() as i64)
        ]);
        table.add_row(row![
            "Money spent",
            r -> format_money(currency_symbol(currency), impact.money_spent)
        ]);
        table.to_string()
    }

    fn format_no_data(&self) -> String {
        "No quit date recorded. Add \"quitDate\" to your profile to start tracking.".to_string()
    }
}

/// JSON formatter for machine-readable output
///
/// Raw, unrounded engine values are emitted alongside the display-oriented
/// whole numbers.
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: Value) -> String {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_status(&self, snapshot: &ProgressSnapshot, _tz: &Tz) -> String {
        Self::render(json!({
            "quit_timestamp": snapshot.quit_timestamp.to_string(),
            "evaluated_at": snapshot.evaluated_at.to_rfc3339(),
            "timezone": snapshot.timezone,
            "elapsed": snapshot.elapsed,
            "day_progress": snapshot.day_progress,
            "cigarettes_avoided": snapshot.metrics.cigarettes_avoided,
            "cigarettes_avoided_whole": snapshot.metrics.whole_cigarettes_avoided(),
            "money_saved": snapshot.metrics.money_saved,
            "currency": snapshot.currency,
            "currency_symbol": currency_symbol(&snapshot.currency),
            "milestones_reached": snapshot.milestones_reached,
            "current_milestone": snapshot.current_milestone,
            "next_milestone": snapshot.next_milestone,
            "minutes_to_next_milestone": snapshot.minutes_to_next_milestone(),
            "achievements": snapshot.unlocked_achievements,
            "quit_in_future": snapshot.quit_in_future,
        }))
    }

    fn format_milestones(&self, elapsed_minutes: f64) -> String {
        Self::render(json!({
            "elapsed_minutes": elapsed_minutes,
            "milestones": milestone_progress(elapsed_minutes).map(|p| json!({
                "id": p.milestone.id,
                "threshold_minutes": p.milestone.threshold_minutes,
                "description": p.milestone.description,
                "icon": p.milestone.icon,
                "progress_percent": p.progress_percent,
                "is_completed": p.is_completed,
            })).collect::<Vec<_>>(),
        }))
    }

    fn format_achievements(&self, stats: &AchievementStats) -> String {
        Self::render(json!({
            "achievements": ACHIEVEMENTS.iter().map(|a| json!({
                "id": a.id,
                "title": a.title,
                "description": a.description,
                "icon": a.icon,
                "requirement": a.requirement,
                "metric": a.metric,
                "value": stats.value_of(a.metric),
                "unlocked": a.is_unlocked(stats),
            })).collect::<Vec<_>>(),
        }))
    }

    fn format_lifetime(&self, impact: &LifetimeImpact, currency: &str) -> String {
        Self::render(json!({
            "days_as_smoker": impact.days_as_smoker,
            "cigarettes_smoked": impact.cigarettes_smoked,
            "money_spent": impact.money_spent,
            "currency": currency,
        }))
    }

    fn format_no_data(&self) -> String {
        Self::render(json!({ "status": "no_quit_date" }))
    }
}

/// Get the appropriate formatter based on output format preference
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}

/// Format a count with thousands separators
pub fn format_number(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Compact calendar breakdown such as `1y 2mo 14d 03:15:00`
///
/// Leading zero years and months are left out. A future quit date is shown
/// with a leading minus sign.
pub fn format_elapsed(elapsed: &ElapsedDuration) -> String {
    let mut parts = Vec::new();
    if elapsed.years != 0 {
        parts.push(format!("{}y", elapsed.years.abs()));
    }
    if elapsed.years != 0 || elapsed.months != 0 {
        parts.push(format!("{}mo", elapsed.months.abs()));
    }
    parts.push(format!("{}d", elapsed.days.abs()));
    parts.push(format!(
        "{:02}:{:02}:{:02}",
        elapsed.hours.abs(),
        elapsed.minutes.abs(),
        elapsed.seconds.abs()
    ));

    let sign = if elapsed.is_negative() { "-" } else { "" };
    format!("{sign}{}", parts.join(" "))
}

/// Human duration for a minute count, e.g. `2d 3h 10m`
pub fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() || minutes <= 0.0 {
        return "0m".to_string();
    }
    let total = minutes.ceil() as i64;
    let (days, hours, mins) = (total / 1440, (total % 1440) / 60, total % 60);
    match (days, hours) {
        (0, 0) => format!("{mins}m"),
        (0, _) => format!("{hours}h {mins}m"),
        _ => format!("{days}d {hours}h {mins}m"),
    }
}
