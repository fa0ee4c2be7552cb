//! One full evaluation of the engine
//!
//! [`ProgressSnapshot`] is what the presentation layer renders. It applies
//! the caller-side policy the calculators leave open: money and cigarette
//! figures are floored at zero when the quit date lies in the future.

use crate::achievements::{AchievementStats, evaluate_achievements};
use crate::elapsed::{DayProgress, ElapsedDuration};
use crate::metrics::DerivedMetrics;
use crate::milestones::{
    HealthMilestone, current_milestone, find_next_milestone, milestones_reached,
};
use crate::timezone::TimezoneConfig;
use crate::types::{HabitProfile, QuitTimestamp, UsageCounters};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub quit_timestamp: QuitTimestamp,
    pub evaluated_at: DateTime<Utc>,
    pub timezone: String,
    pub elapsed: ElapsedDuration,
    pub day_progress: DayProgress,
    pub metrics: DerivedMetrics,
    pub currency: String,
    pub next_milestone: Option<&'static HealthMilestone>,
    pub current_milestone: Option<&'static HealthMilestone>,
    pub milestones_reached: u32,
    pub unlocked_achievements: BTreeSet<&'static str>,
    /// The stored quit date is after `evaluated_at`
    pub quit_in_future: bool,
}

impl ProgressSnapshot {
    /// Evaluate `profile` at `now`
    ///
    /// Returns `None` when the profile has no quit date.
    pub fn compute(
        profile: &HabitProfile,
        counters: &UsageCounters,
        now: DateTime<Utc>,
        timezone: &TimezoneConfig,
    ) -> Option<Self> {
        let Some(quit) = profile.quit_timestamp() else {
            debug!("Profile has no quit date, nothing to compute");
            return None;
        };

        let elapsed = ElapsedDuration::between_in(quit, now, &timezone.tz);
        let quit_in_future = elapsed.is_negative();
        if quit_in_future {
            warn!(
                "Quit date {} is after the evaluation time {}; reporting zero progress",
                quit,
                now.to_rfc3339()
            );
        }

        let metrics = DerivedMetrics::compute(profile, &elapsed).clamped();
        let stats = AchievementStats::from_engine(&elapsed, &metrics, counters);
        let minutes = elapsed.total_minutes;

        Some(Self {
            quit_timestamp: *quit,
            evaluated_at: now,
            timezone: timezone.display_name().to_string(),
            elapsed,
            day_progress: elapsed.day_progress(),
            metrics,
            currency: profile.currency().to_string(),
            next_milestone: find_next_milestone(minutes),
            current_milestone: current_milestone(minutes),
            milestones_reached: milestones_reached(minutes),
            unlocked_achievements: evaluate_achievements(&stats),
            quit_in_future,
        })
    }

    /// Minutes until the next milestone, or `None` once all are reached
    pub fn minutes_to_next_milestone(&self) -> Option<f64> {
        self.next_milestone
            .map(|m| m.minutes_remaining(self.elapsed.total_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{quit_at, utc};

    #[test]
    fn test_snapshot_without_quit_date() {
        let profile = HabitProfile::new(None, 20.0, 20.0, 10.0);
        let snapshot = ProgressSnapshot::compute(
            &profile,
            &UsageCounters::default(),
            utc(2024, 1, 1, 0, 0, 0),
            &TimezoneConfig::utc(),
        );
        assert!(snapshot.is_none());
    }

    #[test]
    fn test_snapshot_ten_days() {
        let quit = quit_at(2024, 3, 1, 9, 0, 0);
        let profile = HabitProfile::new(Some(quit), 20.0, 20.0, 10.0).with_currency("eur");
        let counters = UsageCounters {
            coping_strategies_used: Some(5),
            ..Default::default()
        };

        let snapshot = ProgressSnapshot::compute(
            &profile,
            &counters,
            utc(2024, 3, 11, 9, 0, 0),
            &TimezoneConfig::utc(),
        )
        .unwrap();

        assert!(!snapshot.quit_in_future);
        assert_eq!(snapshot.elapsed.days, 10);
        assert_eq!(snapshot.metrics.cigarettes_avoided, 200.0);
        assert_eq!(snapshot.metrics.money_saved, 100.0);
        assert_eq!(snapshot.currency, "EUR");
        assert_eq!(snapshot.milestones_reached, 5);
        assert_eq!(snapshot.current_milestone.unwrap().id, 5);
        assert_eq!(snapshot.next_milestone.unwrap().id, 6);
        assert_eq!(snapshot.minutes_to_next_milestone(), Some(43_200.0 - 14_400.0));
        assert_eq!(
            snapshot.unlocked_achievements.into_iter().collect::<Vec<_>>(),
            [
                "coping_champion",
                "first_day",
                "health_hero",
                "money_saver",
                "week_warrior"
            ]
        );
    }

    #[test]
    fn test_snapshot_future_quit_is_clamped() {
        let quit = quit_at(2024, 3, 10, 0, 0, 0);
        let profile = HabitProfile::new(Some(quit), 20.0, 20.0, 10.0);

        let snapshot = ProgressSnapshot::compute(
            &profile,
            &UsageCounters::default(),
            utc(2024, 3, 1, 0, 0, 0),
            &TimezoneConfig::utc(),
        )
        .unwrap();

        assert!(snapshot.quit_in_future);
        assert!(snapshot.elapsed.total_days < 0.0);
        assert_eq!(snapshot.metrics.cigarettes_avoided, 0.0);
        assert_eq!(snapshot.metrics.money_saved, 0.0);
        assert_eq!(snapshot.milestones_reached, 0);
        assert!(snapshot.current_milestone.is_none());
        assert_eq!(snapshot.next_milestone.unwrap().id, 1);
        assert!(snapshot.unlocked_achievements.is_empty());
    }

    #[test]
    fn test_snapshot_uses_configured_timezone() {
        let quit = quit_at(2024, 2, 29, 20, 0, 0);
        let profile = HabitProfile::new(Some(quit), 10.0, 20.0, 8.0);
        let now = utc(2024, 3, 29, 21, 0, 0);
        let tokyo = TimezoneConfig::from_cli(Some("Asia/Tokyo"), false).unwrap();

        let snapshot =
            ProgressSnapshot::compute(&profile, &UsageCounters::default(), now, &tokyo).unwrap();
        assert_eq!(snapshot.timezone, "Asia/Tokyo");
        assert_eq!((snapshot.elapsed.months, snapshot.elapsed.days), (0, 29));
    }
}
