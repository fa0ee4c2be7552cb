//! Shared fixtures for unit tests

use crate::elapsed::ElapsedDuration;
use crate::types::{HabitProfile, QuitTimestamp};
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .unwrap()
}

pub fn quit_at(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> QuitTimestamp {
    QuitTimestamp::new(utc(year, month, day, hour, minute, second))
}

/// Profile without a quit date
pub fn profile_with(per_day: f64, per_pack: f64, price: f64) -> HabitProfile {
    HabitProfile::new(None, per_day, per_pack, price)
}

/// Give `profile` a quit date exactly `days` before a fixed "now"
pub fn days_since(profile: HabitProfile, days: i64) -> (HabitProfile, ElapsedDuration) {
    let now = utc(2024, 6, 1, 12, 0, 0);
    let quit = QuitTimestamp::new(now - Duration::days(days));
    let profile = HabitProfile::new(
        Some(quit),
        profile.cigarettes_per_day(),
        profile.cigarettes_per_pack(),
        profile.price_per_pack(),
    )
    .with_currency(profile.currency())
    .with_years_smoking(profile.years_smoking());
    (profile, ElapsedDuration::between(&quit, now))
}
