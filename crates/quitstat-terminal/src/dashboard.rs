//! Live progress dashboard
//!
//! A boxed terminal view redrawn by the `watch` command: the smoke-free
//! clock, the current day ring, savings, and progress toward the next
//! health milestone.

use crate::output::{format_elapsed, format_minutes, format_number};
use chrono_tz::Tz;
use colored::*;
use quitstat_core::achievements::ACHIEVEMENTS;
use quitstat_core::currency::{currency_symbol, format_money};
use quitstat_core::milestones::HEALTH_MILESTONES;
use quitstat_core::numeric::clamped_percent;
use quitstat_core::snapshot::ProgressSnapshot;
use std::time::Duration;

/// Box drawing characters for UI (ASCII)
const BOX_CORNER: &str = "+";
const BOX_HORIZONTAL: &str = "-";
const BOX_VERTICAL: &str = "|";

/// Progress bar characters (ASCII)
const PROGRESS_FULL: &str = "#";
const PROGRESS_EMPTY: &str = ".";

const BAR_WIDTH: usize = 40;

/// Boxed live view of a [`ProgressSnapshot`]
pub struct ProgressDashboard {
    width: usize,
    timezone: Tz,
    /// Whether to use colored output (respects NO_COLOR environment variable)
    colored_output: bool,
}

impl ProgressDashboard {
    pub fn new(timezone: Tz) -> Self {
        let raw_width = terminal_width().unwrap_or(100);
        let width = if raw_width < 60 {
            raw_width
        } else {
            raw_width.clamp(60, 120)
        };
        let colored_output = std::env::var("NO_COLOR").is_err();
        Self {
            width,
            timezone,
            colored_output,
        }
    }

    /// Fixed width and no colors, for tests and non-interactive output
    pub fn plain(timezone: Tz, width: usize) -> Self {
        Self {
            width: width.max(20),
            timezone,
            colored_output: false,
        }
    }

    /// Render the whole dashboard
    pub fn render(&self, snapshot: &ProgressSnapshot, refresh: Duration) -> String {
        let mut output = String::new();

        output.push_str(&self.draw_border(""));
        output.push_str(&self.draw_centered_line("QUITSTAT - SMOKE-FREE PROGRESS"));
        output.push_str(&self.draw_border("\n"));
        output.push_str(&self.draw_line(""));

        output.push_str(&self.draw_clock_section(snapshot));
        output.push_str(&self.draw_line(""));
        output.push_str(&self.draw_savings_section(snapshot));
        output.push_str(&self.draw_line(""));
        output.push_str(&self.draw_milestone_section(snapshot));

        output.push_str(&self.draw_border("\n"));
        output.push_str(&self.draw_centered_line(&format!(
            "Refreshing every {}s - Press Ctrl+C to stop",
            refresh.as_secs()
        )));
        output.push_str(&self.draw_border("\n"));

        output
    }

    fn draw_border(&self, prefix: &str) -> String {
        format!(
            "{}{}{}{}",
            prefix,
            BOX_CORNER,
            BOX_HORIZONTAL.repeat(self.width.saturating_sub(2)),
            BOX_CORNER
        )
    }

    fn draw_centered_line(&self, text: &str) -> String {
        let text_width = console::measure_text_width(text);
        let available_width = self.width.saturating_sub(2);
        if text_width >= available_width {
            return format!("\n{} {} {}", BOX_VERTICAL, text, BOX_VERTICAL);
        }
        let padding = (available_width - text_width) / 2;
        format!(
            "\n{}{}{}{}{}",
            BOX_VERTICAL,
            " ".repeat(padding),
            text,
            " ".repeat(available_width - padding - text_width),
            BOX_VERTICAL
        )
    }

    /// Left-aligned line, truncated to the box
    fn draw_line(&self, content: &str) -> String {
        let available_width = self.width.saturating_sub(4);
        let truncated = console::truncate_str(content, available_width, "...");
        let padding = available_width.saturating_sub(console::measure_text_width(&truncated));
        format!(
            "\n{} {}{} {}",
            BOX_VERTICAL,
            truncated,
            " ".repeat(padding),
            BOX_VERTICAL
        )
    }

    fn draw_clock_section(&self, snapshot: &ProgressSnapshot) -> String {
        let mut output = String::new();

        let quit_local = snapshot
            .quit_timestamp
            .inner()
            .with_timezone(&self.timezone)
            .format("%Y-%m-%d %H:%M");
        output.push_str(&self.draw_line(&format!(
            "SMOKE-FREE   {}   since {}",
            self.paint(&format_elapsed(&snapshot.elapsed), Tone::Good),
            quit_local
        )));

        let day = snapshot.day_progress;
        let bar = self.progress_bar(day.percent, Tone::Good);
        output.push_str(&self.draw_line(&format!(
            "DAY {:<8} {}  {:5.1}%",
            day.whole_days + 1,
            bar,
            day.percent
        )));

        if snapshot.quit_in_future {
            output.push_str(&self.draw_line(&format!(
                "   {}",
                self.paint("Quit date is in the future", Tone::Warn)
            )));
        } else {
            output.push_str(&self.draw_line(&format!(
                "             {} until day {}",
                format_minutes(day.hours_to_next_day() * 60.0),
                day.whole_days + 2
            )));
        }

        output
    }

    fn draw_savings_section(&self, snapshot: &ProgressSnapshot) -> String {
        let mut output = String::new();
        let symbol = currency_symbol(&snapshot.currency);

        output.push_str(&self.draw_line(&format!(
            "SAVED        {}   Cigarettes avoided: {}",
            self.paint(&format_money(symbol, snapshot.metrics.money_saved), Tone::Good),
            format_number(snapshot.metrics.whole_cigarettes_avoided())
        )));
        output.push_str(&self.draw_line(&format!(
            "   Achievements: {}/{}  Milestones: {}/{}",
            snapshot.unlocked_achievements.len(),
            ACHIEVEMENTS.len(),
            snapshot.milestones_reached,
            HEALTH_MILESTONES.len()
        )));

        output
    }

    fn draw_milestone_section(&self, snapshot: &ProgressSnapshot) -> String {
        let mut output = String::new();

        match snapshot.next_milestone {
            Some(next) => {
                let percent = clamped_percent(
                    snapshot.elapsed.total_minutes,
                    f64::from(next.threshold_minutes),
                );
                output.push_str(&self.draw_line(&format!(
                    "NEXT         {}  {:5.1}%",
                    self.progress_bar(percent, Tone::Warn),
                    percent
                )));
                output.push_str(&self.draw_line(&format!(
                    "   {} {} (in {})",
                    next.icon,
                    next.description,
                    format_minutes(next.minutes_remaining(snapshot.elapsed.total_minutes))
                )));
            }
            None => {
                output.push_str(&self.draw_line(&format!(
                    "NEXT         {}",
                    self.paint("All health milestones reached", Tone::Good)
                )));
            }
        }

        if let Some(current) = snapshot.current_milestone {
            output.push_str(&self.draw_line(&format!(
                "   Latest: {} {}",
                current.icon, current.description
            )));
        }

        output
    }

    fn progress_bar(&self, percentage: f64, tone: Tone) -> String {
        let clamped = if percentage.is_finite() {
            percentage.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let filled = ((clamped / 100.0) * BAR_WIDTH as f64) as usize;
        let filled = filled.min(BAR_WIDTH);
        let bar = format!(
            "[{}{}]",
            PROGRESS_FULL.repeat(filled),
            PROGRESS_EMPTY.repeat(BAR_WIDTH - filled)
        );
        self.paint(&bar, tone)
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.colored_output {
            return text.to_string();
        }
        match tone {
            Tone::Good => text.green().to_string(),
            Tone::Warn => text.yellow().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Warn,
}

/// Get terminal width using the cross-platform terminal_size crate
fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(width, _)| width.0 as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quitstat_core::timezone::TimezoneConfig;
    use quitstat_core::{HabitProfile, QuitTimestamp, UsageCounters};

    fn snapshot_after_hours(hours: i64) -> ProgressSnapshot {
        let quit = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let profile = HabitProfile::new(Some(QuitTimestamp::new(quit)), 20.0, 20.0, 10.0);
        ProgressSnapshot::compute(
            &profile,
            &UsageCounters::default(),
            quit + chrono::Duration::hours(hours),
            &TimezoneConfig::utc(),
        )
        .unwrap()
    }

    #[test]
    fn test_render_lines_have_box_width() {
        let dashboard = ProgressDashboard::plain(Tz::UTC, 80);
        let output = dashboard.render(&snapshot_after_hours(30), Duration::from_secs(60));

        for line in output.lines() {
            assert_eq!(console::measure_text_width(line), 80, "bad line: {line:?}");
        }
    }

    #[test]
    fn test_render_content() {
        let dashboard = ProgressDashboard::plain(Tz::UTC, 100);
        let output = dashboard.render(&snapshot_after_hours(30), Duration::from_secs(60));

        assert!(output.contains("QUITSTAT - SMOKE-FREE PROGRESS"));
        assert!(output.contains("1d 06:00:00"));
        assert!(output.contains("since 2024-05-01 08:00"));
        assert!(output.contains("DAY 2"));
        assert!(output.contains("25.0%"));
        assert!(output.contains("18h 0m until day 3"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("Cigarettes avoided: 25"));
        assert!(output.contains("Sense of taste and smell improve"));
        assert!(output.contains("Latest: 💪 Risk of heart attack begins to decrease"));
        assert!(output.contains("Refreshing every 60s"));
    }

    #[test]
    fn test_render_all_milestones_reached() {
        let dashboard = ProgressDashboard::plain(Tz::UTC, 100);
        let output = dashboard.render(&snapshot_after_hours(24 * 400), Duration::from_secs(60));
        assert!(output.contains("All health milestones reached"));
    }

    #[test]
    fn test_render_future_quit_date() {
        let dashboard = ProgressDashboard::plain(Tz::UTC, 100);
        let output = dashboard.render(&snapshot_after_hours(-5), Duration::from_secs(60));
        assert!(output.contains("Quit date is in the future"));
        assert!(!output.contains("until day"));
    }

    #[test]
    fn test_plain_has_no_ansi() {
        let dashboard = ProgressDashboard::plain(Tz::UTC, 80);
        let output = dashboard.render(&snapshot_after_hours(2), Duration::from_secs(1));
        assert!(!output.contains('\u{1b}'));
    }
}
