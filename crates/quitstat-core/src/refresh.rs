//! Refresh cadence for live views
//!
//! Seconds matter during the first hour, so the view ticks every second.
//! After that a per-minute refresh is enough.

use crate::elapsed::ElapsedDuration;
use std::time::Duration;

pub const FAST_REFRESH: Duration = Duration::from_secs(1);
pub const SLOW_REFRESH: Duration = Duration::from_secs(60);

/// How often a live view should recompute
pub fn refresh_interval(elapsed: Option<&ElapsedDuration>) -> Duration {
    match elapsed {
        Some(elapsed) if elapsed.total_hours < 1.0 => FAST_REFRESH,
        _ => SLOW_REFRESH,
    }
}
