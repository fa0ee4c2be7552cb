//! Achievement badges
//!
//! Each badge compares one [`AchievementMetric`] against a fixed requirement.
//! Time, money and milestone counts come from the engine. The remaining
//! counters are kept by the usage log and only compared here.
//!
//! # Examples
//!
//! ```
//! use quitstat_core::achievements::{AchievementStats, evaluate_achievements};
//!
//! let stats = AchievementStats {
//!     minutes_quit: 1_440.0,
//!     ..Default::default()
//! };
//! let unlocked = evaluate_achievements(&stats);
//! assert!(unlocked.contains("first_day"));
//! assert!(!unlocked.contains("week_warrior"));
//! ```

use crate::elapsed::ElapsedDuration;
use crate::metrics::DerivedMetrics;
use crate::milestones::milestones_reached;
use crate::types::UsageCounters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The value an achievement requirement is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementMetric {
    MinutesQuit,
    MoneySaved,
    CigarettesAvoided,
    BreathingExercises,
    CopingStrategies,
    MilestonesReached,
    ConsecutiveDays,
}

impl fmt::Display for AchievementMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AchievementMetric::MinutesQuit => "minutes smoke-free",
            AchievementMetric::MoneySaved => "money saved",
            AchievementMetric::CigarettesAvoided => "cigarettes avoided",
            AchievementMetric::BreathingExercises => "breathing exercises",
            AchievementMetric::CopingStrategies => "coping strategies",
            AchievementMetric::MilestonesReached => "health milestones",
            AchievementMetric::ConsecutiveDays => "consecutive days",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: f64,
    pub metric: AchievementMetric,
}

impl Achievement {
    pub fn is_unlocked(&self, stats: &AchievementStats) -> bool {
        stats.value_of(self.metric) >= self.requirement
    }

    /// Fraction of the requirement met, in `[0, 100]`
    pub fn progress_percent(&self, stats: &AchievementStats) -> f64 {
        crate::numeric::clamped_percent(stats.value_of(self.metric), self.requirement)
    }
}

pub static ACHIEVEMENTS: [Achievement; 8] = [
    Achievement {
        id: "first_day",
        title: "First 24 Hours",
        description: "Completed your first day smoke-free",
        icon: "🌟",
        requirement: 1_440.0,
        metric: AchievementMetric::MinutesQuit,
    },
    Achievement {
        id: "week_warrior",
        title: "Week Warrior",
        description: "Stayed smoke-free for a week",
        icon: "🛡️",
        requirement: 10_080.0,
        metric: AchievementMetric::MinutesQuit,
    },
    Achievement {
        id: "money_saver",
        title: "Money Saver",
        description: "Saved your first 100",
        icon: "💰",
        requirement: 100.0,
        metric: AchievementMetric::MoneySaved,
    },
    Achievement {
        id: "breath_master",
        title: "Breath Master",
        description: "Completed 10 breathing exercises",
        icon: "🧘",
        requirement: 10.0,
        metric: AchievementMetric::BreathingExercises,
    },
    Achievement {
        id: "coping_champion",
        title: "Coping Champion",
        description: "Used 5 different coping strategies",
        icon: "🏅",
        requirement: 5.0,
        metric: AchievementMetric::CopingStrategies,
    },
    Achievement {
        id: "month_milestone",
        title: "Monthly Milestone",
        description: "Smoke-free for a month",
        icon: "🌙",
        requirement: 43_200.0,
        metric: AchievementMetric::MinutesQuit,
    },
    Achievement {
        id: "health_hero",
        title: "Health Hero",
        description: "Reached 5 health milestones",
        icon: "⭐",
        requirement: 5.0,
        metric: AchievementMetric::MilestonesReached,
    },
    Achievement {
        id: "determination",
        title: "Pure Determination",
        description: "Logged in for 30 consecutive days",
        icon: "🔥",
        requirement: 30.0,
        metric: AchievementMetric::ConsecutiveDays,
    },
];

/// Everything an achievement can be measured against
///
/// Counters the usage log did not report stay `None` and count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AchievementStats {
    pub minutes_quit: f64,
    pub money_saved: f64,
    pub cigarettes_avoided: f64,
    pub milestones_reached: u32,
    pub breathing_exercises: Option<u32>,
    pub coping_strategies_used: Option<u32>,
    pub consecutive_days: Option<u32>,
}

impl AchievementStats {
    /// Assemble stats from engine output and the usage counters
    pub fn from_engine(
        elapsed: &ElapsedDuration,
        metrics: &DerivedMetrics,
        counters: &UsageCounters,
    ) -> Self {
        Self {
            minutes_quit: elapsed.total_minutes,
            money_saved: metrics.money_saved,
            cigarettes_avoided: metrics.cigarettes_avoided,
            milestones_reached: milestones_reached(elapsed.total_minutes),
            breathing_exercises: counters.breathing_exercises,
            coping_strategies_used: counters.coping_strategies_used,
            consecutive_days: counters.consecutive_days,
        }
    }

    /// Current value for `metric`; NaN reads as zero
    pub fn value_of(&self, metric: AchievementMetric) -> f64 {
        let value = match metric {
            AchievementMetric::MinutesQuit => self.minutes_quit,
            AchievementMetric::MoneySaved => self.money_saved,
            AchievementMetric::CigarettesAvoided => self.cigarettes_avoided,
            AchievementMetric::MilestonesReached => f64::from(self.milestones_reached),
            AchievementMetric::BreathingExercises => counter(self.breathing_exercises),
            AchievementMetric::CopingStrategies => counter(self.coping_strategies_used),
            AchievementMetric::ConsecutiveDays => counter(self.consecutive_days),
        };
        if value.is_nan() { 0.0 } else { value }
    }
}

fn counter(value: Option<u32>) -> f64 {
    f64::from(value.unwrap_or(0))
}

/// Ids of all unlocked achievements
pub fn evaluate_achievements(stats: &AchievementStats) -> BTreeSet<&'static str> {
    evaluate_achievements_in(&ACHIEVEMENTS, stats)
}

/// [`evaluate_achievements`] over an arbitrary table
pub fn evaluate_achievements_in<'a>(
    table: &'a [Achievement],
    stats: &AchievementStats,
) -> BTreeSet<&'a str> {
    table
        .iter()
        .filter(|a| a.is_unlocked(stats))
        .map(|a| a.id)
        .collect()
}

/// Unlocked achievements in table order
pub fn unlocked_achievements(stats: &AchievementStats) -> Vec<&'static Achievement> {
    ACHIEVEMENTS.iter().filter(|a| a.is_unlocked(stats)).collect()
}
