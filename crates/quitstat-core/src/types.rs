//! Core domain types for quitstat
//!
//! The profile store hands us loosely typed documents. [`RawHabitProfile`]
//! mirrors that shape verbatim, and [`HabitProfile::from_raw`] is the single
//! place where missing or malformed fields are replaced by documented
//! defaults. Everything downstream of `HabitProfile` can assume finite,
//! in-range numbers.

use crate::metrics::effective_cigarettes_per_pack;
use crate::numeric::loose_number;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Currency assumed when the profile does not name one
pub const DEFAULT_CURRENCY: &str = "USD";

/// The instant a user became smoke-free
///
/// # Examples
/// ```
/// use quitstat_core::types::QuitTimestamp;
///
/// let quit = QuitTimestamp::parse("2024-03-01T08:30:00Z").unwrap();
/// assert_eq!(quit.to_string(), "2024-03-01T08:30:00+00:00");
///
/// // A bare date means midnight UTC
/// let quit = QuitTimestamp::parse("2024-03-01").unwrap();
/// assert_eq!(quit.inner().timestamp(), 1709251200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuitTimestamp(DateTime<Utc>);

impl QuitTimestamp {
    /// Create a new QuitTimestamp
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the inner DateTime
    pub fn inner(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parse a user-supplied instant
    ///
    /// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) and
    /// `YYYY-MM-DD` (midnight UTC).
    pub fn parse(input: &str) -> crate::Result<Self> {
        parse_instant_str(input).map(Self).ok_or_else(|| {
            crate::QuitstatError::InvalidTimestamp(format!(
                "'{input}', expected RFC 3339, YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD"
            ))
        })
    }

    /// Interpret a stored document value as a quit timestamp
    ///
    /// Besides the string forms of [`QuitTimestamp::parse`], numbers are read
    /// as epoch milliseconds and `{"seconds", "nanoseconds"}` objects as
    /// document-store timestamps. Anything else yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let dt = match value {
            Value::String(s) => parse_instant_str(s),
            Value::Number(n) => {
                let millis = match n.as_i64() {
                    Some(ms) => ms,
                    None => {
                        let ms = n.as_f64()?;
                        if !ms.is_finite() {
                            return None;
                        }
                        ms.round() as i64
                    }
                };
                Utc.timestamp_millis_opt(millis).single()
            }
            Value::Object(fields) => {
                let seconds = fields
                    .get("seconds")
                    .or_else(|| fields.get("_seconds"))
                    .and_then(Value::as_i64)?;
                let nanos = fields
                    .get("nanoseconds")
                    .or_else(|| fields.get("_nanoseconds"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0);
                let nanos = u32::try_from(nanos).ok().filter(|n| *n < 1_000_000_000)?;
                Utc.timestamp_opt(seconds, nanos).single()
            }
            _ => None,
        };
        dt.map(Self)
    }
}

impl fmt::Display for QuitTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl AsRef<DateTime<Utc>> for QuitTimestamp {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.0
    }
}

fn parse_instant_str(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Habit profile exactly as the profile store returns it
///
/// Every field is optional and loosely typed: numbers may arrive as strings,
/// fields may be null, and the quit date may be any of the shapes accepted by
/// [`QuitTimestamp::from_value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHabitProfile {
    /// Quit instant
    #[serde(default, alias = "quitTimestamp")]
    pub quit_date: Option<Value>,
    /// Cigarettes smoked per day before quitting
    #[serde(default)]
    pub cigarettes_per_day: Option<Value>,
    /// Cigarettes in one pack
    #[serde(default)]
    pub cigarettes_per_pack: Option<Value>,
    /// Price of one pack
    #[serde(default)]
    pub price_per_pack: Option<Value>,
    /// ISO currency code for `price_per_pack`
    #[serde(default)]
    pub currency: Option<Value>,
    /// Years spent smoking before the quit date
    #[serde(default)]
    pub years_smoking: Option<Value>,
}

/// Validated habit profile
///
/// Built only through [`HabitProfile::from_raw`] or [`HabitProfile::new`],
/// both of which normalise their input:
///
/// - rates, prices and years are finite and non-negative (otherwise `0`)
/// - `cigarettes_per_pack` is finite and positive (otherwise
///   [`crate::metrics::DEFAULT_CIGARETTES_PER_PACK`])
///
/// # Examples
/// ```
/// use quitstat_core::types::{HabitProfile, RawHabitProfile};
/// use serde_json::json;
///
/// let raw: RawHabitProfile = serde_json::from_value(json!({
///     "quitDate": "2024-01-01",
///     "cigarettesPerDay": "15",
///     "cigarettesPerPack": null,
///     "pricePerPack": 9.5,
/// }))
/// .unwrap();
///
/// let profile = HabitProfile::from_raw(&raw);
/// assert_eq!(profile.cigarettes_per_day(), 15.0);
/// assert_eq!(profile.cigarettes_per_pack(), 20.0);
/// assert_eq!(profile.price_per_pack(), 9.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitProfile {
    quit_timestamp: Option<QuitTimestamp>,
    cigarettes_per_day: f64,
    cigarettes_per_pack: f64,
    price_per_pack: f64,
    currency: String,
    years_smoking: f64,
}

impl HabitProfile {
    /// Build a profile from already-typed values, normalising them
    pub fn new(
        quit_timestamp: Option<QuitTimestamp>,
        cigarettes_per_day: f64,
        cigarettes_per_pack: f64,
        price_per_pack: f64,
    ) -> Self {
        Self {
            quit_timestamp,
            cigarettes_per_day: non_negative_or_zero(Some(cigarettes_per_day), "cigarettesPerDay"),
            cigarettes_per_pack: effective_cigarettes_per_pack(cigarettes_per_pack),
            price_per_pack: non_negative_or_zero(Some(price_per_pack), "pricePerPack"),
            currency: DEFAULT_CURRENCY.to_string(),
            years_smoking: 0.0,
        }
    }

    /// Normalise a raw profile document
    pub fn from_raw(raw: &RawHabitProfile) -> Self {
        let quit_timestamp = raw.quit_date.as_ref().and_then(|value| {
            let parsed = QuitTimestamp::from_value(value);
            if parsed.is_none() && !value.is_null() {
                debug!("Ignoring unparseable quit date: {}", value);
            }
            parsed
        });

        let cigarettes_per_pack = raw
            .cigarettes_per_pack
            .as_ref()
            .and_then(loose_number)
            .unwrap_or(0.0);

        let currency = raw
            .currency
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        Self {
            quit_timestamp,
            cigarettes_per_day: non_negative_or_zero(
                raw.cigarettes_per_day.as_ref().and_then(loose_number),
                "cigarettesPerDay",
            ),
            cigarettes_per_pack: effective_cigarettes_per_pack(cigarettes_per_pack),
            price_per_pack: non_negative_or_zero(
                raw.price_per_pack.as_ref().and_then(loose_number),
                "pricePerPack",
            ),
            currency,
            years_smoking: non_negative_or_zero(
                raw.years_smoking.as_ref().and_then(loose_number),
                "yearsSmoking",
            ),
        }
    }

    /// Set the currency code
    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into().trim().to_uppercase();
        if self.currency.is_empty() {
            self.currency = DEFAULT_CURRENCY.to_string();
        }
        self
    }

    /// Set the number of years smoked before quitting
    pub fn with_years_smoking(mut self, years: f64) -> Self {
        self.years_smoking = non_negative_or_zero(Some(years), "yearsSmoking");
        self
    }

    pub fn quit_timestamp(&self) -> Option<&QuitTimestamp> {
        self.quit_timestamp.as_ref()
    }

    pub fn cigarettes_per_day(&self) -> f64 {
        self.cigarettes_per_day
    }

    pub fn cigarettes_per_pack(&self) -> f64 {
        self.cigarettes_per_pack
    }

    pub fn price_per_pack(&self) -> f64 {
        self.price_per_pack
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn years_smoking(&self) -> f64 {
        self.years_smoking
    }
}

fn non_negative_or_zero(value: Option<f64>, field: &str) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) => {
            debug!("Replacing out-of-range {} ({}) with 0", field, v);
            0.0
        }
        None => 0.0,
    }
}

/// Counters kept by the usage-event log
///
/// The engine never increments these; it only compares them against
/// achievement requirements. A missing counter counts as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounters {
    /// Completed breathing exercises
    #[serde(default)]
    pub breathing_exercises: Option<u32>,
    /// Distinct coping strategies used
    #[serde(default)]
    pub coping_strategies_used: Option<u32>,
    /// Consecutive days the user opened the app
    #[serde(default)]
    pub consecutive_days: Option<u32>,
}
