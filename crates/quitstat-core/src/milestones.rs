//! Health milestones
//!
//! A milestone is reached once elapsed minutes meet or exceed its threshold,
//! and is "next" while elapsed minutes are strictly below it.
//!
//! # Examples
//!
//! ```
//! use quitstat_core::milestones::{find_next_milestone, milestones_reached};
//!
//! assert_eq!(find_next_milestone(19.0).unwrap().threshold_minutes, 20);
//! assert_eq!(find_next_milestone(20.0).unwrap().threshold_minutes, 480);
//! assert!(find_next_milestone(525_600.0).is_none());
//!
//! assert_eq!(milestones_reached(1_440.0), 3);
//! ```

use crate::numeric::clamped_percent;
use serde::Serialize;

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// A documented health benefit tied to an elapsed-time threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthMilestone {
    pub id: u32,
    pub threshold_minutes: u32,
    pub description: &'static str,
    pub icon: &'static str,
}

impl HealthMilestone {
    /// Whether `elapsed_minutes` has reached this milestone
    pub fn is_reached(&self, elapsed_minutes: f64) -> bool {
        sanitize(elapsed_minutes) >= f64::from(self.threshold_minutes)
    }

    /// Minutes still to go, or zero once reached
    pub fn minutes_remaining(&self, elapsed_minutes: f64) -> f64 {
        (f64::from(self.threshold_minutes) - sanitize(elapsed_minutes)).max(0.0)
    }

    /// Threshold in the largest unit that divides it evenly
    ///
    /// ```
    /// use quitstat_core::milestones::HEALTH_MILESTONES;
    ///
    /// assert_eq!(HEALTH_MILESTONES[0].threshold_label(), "20 minutes");
    /// assert_eq!(HEALTH_MILESTONES[1].threshold_label(), "8 hours");
    /// assert_eq!(HEALTH_MILESTONES[2].threshold_label(), "1 day");
    /// ```
    pub fn threshold_label(&self) -> String {
        let minutes = self.threshold_minutes;
        let (value, unit) = if minutes > 0 && minutes % MINUTES_PER_DAY == 0 {
            (minutes / MINUTES_PER_DAY, "day")
        } else if minutes > 0 && minutes % MINUTES_PER_HOUR == 0 {
            (minutes / MINUTES_PER_HOUR, "hour")
        } else {
            (minutes, "minute")
        };

        if value == 1 {
            format!("{value} {unit}")
        } else {
            format!("{value} {unit}s")
        }
    }
}

/// The milestone table, in ascending threshold order
pub static HEALTH_MILESTONES: [HealthMilestone; 9] = [
    HealthMilestone {
        id: 1,
        threshold_minutes: 20,
        description: "Blood pressure and heart rate return to normal",
        icon: "❤️",
    },
    HealthMilestone {
        id: 2,
        threshold_minutes: 480,
        description: "Carbon monoxide levels drop to normal",
        icon: "🫁",
    },
    HealthMilestone {
        id: 3,
        threshold_minutes: 1_440,
        description: "Risk of heart attack begins to decrease",
        icon: "💪",
    },
    HealthMilestone {
        id: 4,
        threshold_minutes: 2_880,
        description: "Sense of taste and smell improve",
        icon: "👃",
    },
    HealthMilestone {
        id: 5,
        threshold_minutes: 10_080,
        description: "Breathing becomes easier",
        icon: "🌬️",
    },
    HealthMilestone {
        id: 6,
        threshold_minutes: 43_200,
        description: "Lung function increases up to 30%",
        icon: "🎯",
    },
    HealthMilestone {
        id: 7,
        threshold_minutes: 129_600,
        description: "Circulation improves significantly",
        icon: "🔄",
    },
    HealthMilestone {
        id: 8,
        threshold_minutes: 259_200,
        description: "Coughing and shortness of breath decrease",
        icon: "🏃",
    },
    HealthMilestone {
        id: 9,
        threshold_minutes: 525_600,
        description: "Risk of heart disease drops by 50%",
        icon: "🏆",
    },
];

// NaN counts as no time elapsed
fn sanitize(elapsed_minutes: f64) -> f64 {
    if elapsed_minutes.is_nan() {
        0.0
    } else {
        elapsed_minutes
    }
}

/// First milestone not yet reached, or `None` once all are reached
pub fn find_next_milestone(elapsed_minutes: f64) -> Option<&'static HealthMilestone> {
    find_next_milestone_in(&HEALTH_MILESTONES, elapsed_minutes)
}

/// [`find_next_milestone`] over an arbitrary ascending table
pub fn find_next_milestone_in(
    table: &[HealthMilestone],
    elapsed_minutes: f64,
) -> Option<&HealthMilestone> {
    table.iter().find(|m| !m.is_reached(elapsed_minutes))
}

/// Last milestone reached, if any
pub fn current_milestone(elapsed_minutes: f64) -> Option<&'static HealthMilestone> {
    HEALTH_MILESTONES
        .iter()
        .rev()
        .find(|m| m.is_reached(elapsed_minutes))
}

/// Number of milestones reached
pub fn milestones_reached(elapsed_minutes: f64) -> u32 {
    HEALTH_MILESTONES
        .iter()
        .filter(|m| m.is_reached(elapsed_minutes))
        .count() as u32
}

/// Progress toward a single milestone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MilestoneProgress<'a> {
    pub milestone: &'a HealthMilestone,
    /// In `[0, 100]`
    pub progress_percent: f64,
    pub is_completed: bool,
}

impl<'a> MilestoneProgress<'a> {
    pub fn new(milestone: &'a HealthMilestone, elapsed_minutes: f64) -> Self {
        Self {
            milestone,
            progress_percent: clamped_percent(
                elapsed_minutes,
                f64::from(milestone.threshold_minutes),
            ),
            is_completed: milestone.is_reached(elapsed_minutes),
        }
    }
}

/// Progress toward every milestone in table order
///
/// The iterator is lazy and can be cloned to restart from the beginning.
pub fn milestone_progress(
    elapsed_minutes: f64,
) -> impl Iterator<Item = MilestoneProgress<'static>> + Clone {
    milestone_progress_in(&HEALTH_MILESTONES, elapsed_minutes)
}

pub fn milestone_progress_in(
    table: &[HealthMilestone],
    elapsed_minutes: f64,
) -> impl Iterator<Item = MilestoneProgress<'_>> + Clone {
    table
        .iter()
        .map(move |milestone| MilestoneProgress::new(milestone, elapsed_minutes))
}
