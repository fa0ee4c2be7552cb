//! Progress and savings calculation engine for quitstat
//!
//! This crate turns a quit timestamp and a smoking-habit profile into
//! elapsed smoke-free time, cigarettes avoided, money saved, health
//! milestones and achievement badges. All calculations are pure: the
//! evaluation instant is always passed in by the caller.

pub mod achievements;
pub mod currency;
pub mod elapsed;
pub mod error;
pub mod metrics;
pub mod milestones;
pub mod numeric;
pub mod refresh;
pub mod snapshot;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use achievements::{Achievement, AchievementMetric, AchievementStats};
pub use elapsed::{DayProgress, ElapsedDuration};
pub use error::{QuitstatError, Result};
pub use metrics::{DEFAULT_CIGARETTES_PER_PACK, DerivedMetrics, LifetimeImpact};
pub use milestones::{HealthMilestone, MilestoneProgress};
pub use snapshot::ProgressSnapshot;
pub use types::{HabitProfile, QuitTimestamp, RawHabitProfile, UsageCounters};
