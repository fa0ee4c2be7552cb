//! Elapsed-time calculator
//!
//! Turns a quit timestamp and an injected "now" into an [`ElapsedDuration`]:
//! calendar-style components for display plus continuous totals that every
//! proportional calculation is based on.
//!
//! The two views are independent. Years and months are counted
//! as whole calendar months in the configured timezone, so `years * 365 +
//! days` does not reconstruct `total_days`. Money and cigarette figures must
//! only ever use the totals.
//!
//! # Examples
//!
//! ```
//! use quitstat_core::elapsed::compute_elapsed_duration;
//! use quitstat_core::types::QuitTimestamp;
//! use chrono::{TimeZone, Utc};
//!
//! let quit = QuitTimestamp::new(Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap());
//! let now = Utc.with_ymd_and_hms(2024, 3, 20, 10, 30, 15).unwrap();
//!
//! let elapsed = compute_elapsed_duration(Some(&quit), now).unwrap();
//! assert_eq!((elapsed.months, elapsed.days), (2, 5));
//! assert_eq!((elapsed.hours, elapsed.minutes, elapsed.seconds), (2, 30, 15));
//!
//! // No quit date is not the same as "just quit"
//! assert!(compute_elapsed_duration(None, now).is_none());
//! ```

use crate::types::QuitTimestamp;
use chrono::{
    DateTime, Datelike, LocalResult, Months, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Time between a quit timestamp and an evaluation instant
///
/// Components are remainders after larger units have been removed. When the
/// quit timestamp lies after `now`, the span is decomposed by magnitude and
/// every component and total carries a negative sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElapsedDuration {
    pub years: i64,
    /// 0–11
    pub months: i64,
    /// Days left over after whole calendar months
    pub days: i64,
    /// 0–23
    pub hours: i64,
    /// 0–59
    pub minutes: i64,
    /// 0–59
    pub seconds: i64,
    pub total_days: f64,
    pub total_hours: f64,
    pub total_minutes: f64,
    pub total_seconds: f64,
}

impl ElapsedDuration {
    /// Elapsed time with calendar months counted in UTC
    pub fn between(quit: &QuitTimestamp, now: DateTime<Utc>) -> Self {
        Self::between_in(quit, now, &Tz::UTC)
    }

    /// Elapsed time with calendar months counted in `tz`
    pub fn between_in(quit: &QuitTimestamp, now: DateTime<Utc>, tz: &Tz) -> Self {
        let quit = *quit.inner();
        let millis = now.signed_duration_since(quit).num_milliseconds() as f64;

        let (earlier, later, sign) = if now < quit {
            (now, quit, -1)
        } else {
            (quit, now, 1)
        };

        let (whole_months, anchor) =
            whole_calendar_months(earlier.with_timezone(tz), later.with_timezone(tz));
        let rest = later
            .signed_duration_since(anchor.with_timezone(&Utc))
            .num_seconds();

        Self {
            years: sign * (whole_months / 12),
            months: sign * (whole_months % 12),
            days: sign * (rest / SECONDS_PER_DAY),
            hours: sign * ((rest % SECONDS_PER_DAY) / SECONDS_PER_HOUR),
            minutes: sign * ((rest % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE),
            seconds: sign * (rest % SECONDS_PER_MINUTE),
            total_days: millis / MS_PER_DAY,
            total_hours: millis / MS_PER_HOUR,
            total_minutes: millis / MS_PER_MINUTE,
            total_seconds: millis / MS_PER_SECOND,
        }
    }

    /// True when the quit timestamp lies after the evaluation instant
    pub fn is_negative(&self) -> bool {
        self.total_seconds < 0.0
    }

    /// Progress through the current smoke-free day
    pub fn day_progress(&self) -> DayProgress {
        DayProgress::from_total_hours(self.total_hours)
    }
}

/// Count whole calendar months from `start` that fit before `end`.
///
/// Returns the count together with the instant reached after adding them.
/// Months are added to the local wall-clock time, clamping to the last day of
/// shorter months (Jan 31 + 1 month is the end of February).
fn whole_calendar_months(start: DateTime<Tz>, end: DateTime<Tz>) -> (i64, DateTime<Tz>) {
    let estimate = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());

    let mut months = estimate.max(0);
    while months > 0 {
        let candidate = u32::try_from(months)
            .ok()
            .and_then(|m| add_local_months(&start, m));
        match candidate {
            Some(anchor) if anchor <= end => return (months, anchor),
            _ => months -= 1,
        }
    }

    (0, start)
}

/// `start` plus `months` on the local calendar
///
/// A wall-clock time repeated by a DST fall-back resolves to its first
/// occurrence. One skipped by a spring-forward keeps `start`'s UTC offset,
/// which lands just past the gap.
fn add_local_months(start: &DateTime<Tz>, months: u32) -> Option<DateTime<Tz>> {
    let tz = start.timezone();
    let local = start.naive_local().checked_add_months(Months::new(months))?;

    match tz.from_local_datetime(&local) {
        LocalResult::Single(anchor) => Some(anchor),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let offset = i64::from(start.offset().fix().local_minus_utc());
            let utc = local.checked_sub_signed(TimeDelta::seconds(offset))?;
            Some(Utc.from_utc_datetime(&utc).with_timezone(&tz))
        }
    }
}

/// Compute the elapsed duration for an optional quit timestamp
///
/// `None` is the explicit "no quit date recorded" signal and must not be
/// confused with a zero duration.
pub fn compute_elapsed_duration(
    quit: Option<&QuitTimestamp>,
    now: DateTime<Utc>,
) -> Option<ElapsedDuration> {
    quit.map(|q| ElapsedDuration::between(q, now))
}

/// Same as [`compute_elapsed_duration`] but with calendar months in `tz`
pub fn compute_elapsed_duration_in(
    quit: Option<&QuitTimestamp>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<ElapsedDuration> {
    quit.map(|q| ElapsedDuration::between_in(q, now, tz))
}

/// Where the user is within the current 24-hour smoke-free day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayProgress {
    /// Completed smoke-free days
    pub whole_days: i64,
    /// Hours elapsed in the current day, in `[0, 24)`
    pub hours_into_day: f64,
    /// `hours_into_day` as a percentage of a day
    pub percent: f64,
}

impl DayProgress {
    /// Derive from cumulative hours; negative or non-finite input yields zero
    pub fn from_total_hours(total_hours: f64) -> Self {
        if !total_hours.is_finite() || total_hours <= 0.0 {
            return Self {
                whole_days: 0,
                hours_into_day: 0.0,
                percent: 0.0,
            };
        }

        let hours_into_day = total_hours % 24.0;
        Self {
            whole_days: (total_hours / 24.0).floor() as i64,
            hours_into_day,
            percent: hours_into_day / 24.0 * 100.0,
        }
    }

    /// Hours left until the next whole day is completed
    pub fn hours_to_next_day(&self) -> f64 {
        24.0 - self.hours_into_day
    }
}
