//! Derived-metric calculator
//!
//! Cigarettes avoided and money saved are proportional to
//! [`ElapsedDuration::total_days`]. The calendar components are display-only
//! and never feed into these figures.
//!
//! # Examples
//!
//! ```
//! use quitstat_core::metrics::DerivedMetrics;
//! use quitstat_core::types::{HabitProfile, QuitTimestamp};
//! use quitstat_core::elapsed::ElapsedDuration;
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 11, 0, 0, 0).unwrap();
//! let quit = QuitTimestamp::new(now - Duration::days(10));
//! let profile = HabitProfile::new(Some(quit), 20.0, 20.0, 10.0);
//!
//! let elapsed = ElapsedDuration::between(&quit, now);
//! let metrics = DerivedMetrics::compute(&profile, &elapsed);
//! assert_eq!(metrics.cigarettes_avoided, 200.0);
//! assert_eq!(metrics.money_saved, 100.0);
//! ```

use crate::elapsed::ElapsedDuration;
use crate::numeric::finite_or_zero;
use crate::types::HabitProfile;
use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Pack size assumed when the profile has none or an unusable one
pub const DEFAULT_CIGARETTES_PER_PACK: f64 = 20.0;

/// Pack size to divide by: the given value if positive and finite, else
/// [`DEFAULT_CIGARETTES_PER_PACK`]
pub fn effective_cigarettes_per_pack(cigarettes_per_pack: f64) -> f64 {
    if cigarettes_per_pack.is_finite() && cigarettes_per_pack > 0.0 {
        cigarettes_per_pack
    } else {
        DEFAULT_CIGARETTES_PER_PACK
    }
}

/// Cigarettes not smoked since the quit timestamp
///
/// Fractional and signed: a future quit date gives a negative count.
pub fn compute_cigarettes_avoided(profile: &HabitProfile, elapsed: &ElapsedDuration) -> f64 {
    finite_or_zero(profile.cigarettes_per_day() * elapsed.total_days)
}

/// Money not spent on cigarettes since the quit timestamp
pub fn compute_money_saved(profile: &HabitProfile, elapsed: &ElapsedDuration) -> f64 {
    let avoided = compute_cigarettes_avoided(profile, elapsed);
    let packs = avoided / effective_cigarettes_per_pack(profile.cigarettes_per_pack());
    finite_or_zero(packs * profile.price_per_pack())
}

/// Cigarettes avoided and money saved for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub cigarettes_avoided: f64,
    pub money_saved: f64,
}

impl DerivedMetrics {
    pub fn compute(profile: &HabitProfile, elapsed: &ElapsedDuration) -> Self {
        Self {
            cigarettes_avoided: compute_cigarettes_avoided(profile, elapsed),
            money_saved: compute_money_saved(profile, elapsed),
        }
    }

    /// Both figures floored at zero
    pub fn clamped(self) -> Self {
        Self {
            cigarettes_avoided: finite_or_zero(self.cigarettes_avoided.max(0.0)),
            money_saved: finite_or_zero(self.money_saved.max(0.0)),
        }
    }

    /// Whole cigarettes avoided, as shown to users
    pub fn whole_cigarettes_avoided(&self) -> i64 {
        self.cigarettes_avoided.floor() as i64
    }
}

/// Cost of the smoking years before the quit date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifetimeImpact {
    pub days_as_smoker: i64,
    pub cigarettes_smoked: f64,
    pub money_spent: f64,
}

impl LifetimeImpact {
    /// Estimate the smoking history for `profile`
    ///
    /// The smoking period runs from `now` minus `years_smoking` (rounded to
    /// whole calendar months) up to the quit date. Returns `None` without a
    /// quit date.
    pub fn compute(profile: &HabitProfile, now: DateTime<Utc>) -> Option<Self> {
        let quit = *profile.quit_timestamp()?.inner();

        let months = (profile.years_smoking() * 12.0).round();
        let started = if months > 0.0 && months <= f64::from(u32::MAX) {
            now.checked_sub_months(Months::new(months as u32))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        } else {
            now
        };

        let days_as_smoker = quit.signed_duration_since(started).num_days().max(0);
        let days = days_as_smoker as f64;
        let per_pack = effective_cigarettes_per_pack(profile.cigarettes_per_pack());

        Some(Self {
            days_as_smoker,
            cigarettes_smoked: finite_or_zero(profile.cigarettes_per_day() * days),
            money_spent: finite_or_zero(
                profile.cigarettes_per_day() / per_pack * profile.price_per_pack() * days,
            ),
        })
    }
}
