//! Timezone resolution for calendar decomposition
//!
//! Month and year boundaries in the elapsed-time breakdown depend on the
//! calendar the user lives in. The zone comes from, in order: `--utc`,
//! `--timezone` (or `QUITSTAT_TZ`), the `TZ` environment variable, the
//! platform setting, and finally UTC.

use crate::error::{QuitstatError, Result};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Where the configured zone came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimezoneSource {
    /// `--utc`, or an explicit request for UTC
    Forced,
    /// `--timezone` / `QUITSTAT_TZ`
    Explicit,
    /// The `TZ` environment variable
    Environment,
    /// The platform setting via `iana-time-zone`
    System,
    /// Nothing usable was found
    Fallback,
}

impl fmt::Display for TimezoneSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimezoneSource::Forced => "forced",
            TimezoneSource::Explicit => "explicit",
            TimezoneSource::Environment => "TZ",
            TimezoneSource::System => "system",
            TimezoneSource::Fallback => "fallback",
        })
    }
}

/// The zone used for calendar arithmetic and clock display
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    pub tz: Tz,
    pub source: TimezoneSource,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        let (tz, source) = detect_local_timezone();
        Self { tz, source }
    }
}

impl TimezoneConfig {
    pub fn utc() -> Self {
        Self {
            tz: Tz::UTC,
            source: TimezoneSource::Forced,
        }
    }

    /// Resolve the zone from the `--timezone` and `--utc` flags
    ///
    /// # Errors
    ///
    /// Returns [`QuitstatError::InvalidTimezone`] when `timezone` is not an
    /// IANA zone name.
    pub fn from_cli(timezone: Option<&str>, use_utc: bool) -> Result<Self> {
        if use_utc {
            return Ok(Self::utc());
        }

        match timezone {
            Some(name) => Ok(Self {
                tz: parse_timezone(name)?,
                source: TimezoneSource::Explicit,
            }),
            None => Ok(Self::default()),
        }
    }

    pub fn is_utc(&self) -> bool {
        self.tz == Tz::UTC
    }

    pub fn display_name(&self) -> &str {
        self.tz.name()
    }
}

/// Parse an IANA zone name; `utc` and `z` are accepted in any case
pub fn parse_timezone(name: &str) -> Result<Tz> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("utc") || name.eq_ignore_ascii_case("z") {
        return Ok(Tz::UTC);
    }

    Tz::from_str(name).map_err(|_| {
        QuitstatError::InvalidTimezone(format!(
            "'{name}' is not an IANA zone name such as 'Europe/Berlin' or 'America/New_York'"
        ))
    })
}

/// Detect the local zone and report where it was found
pub fn detect_local_timezone() -> (Tz, TimezoneSource) {
    if let Ok(value) = std::env::var("TZ")
        && let Ok(tz) = parse_timezone(&value)
    {
        debug!("Timezone {} taken from TZ", tz.name());
        return (tz, TimezoneSource::Environment);
    }

    let platform = iana_time_zone::get_timezone();
    match platform.as_deref().map(Tz::from_str) {
        Ok(Ok(tz)) => {
            debug!("Timezone {} reported by the platform", tz.name());
            (tz, TimezoneSource::System)
        }
        Ok(Err(_)) => {
            debug!("Platform timezone {:?} is unknown, using UTC", platform);
            (Tz::UTC, TimezoneSource::Fallback)
        }
        Err(e) => {
            debug!("Platform timezone unavailable ({}), using UTC", e);
            (Tz::UTC, TimezoneSource::Fallback)
        }
    }
}
