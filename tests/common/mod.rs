//! Common test utilities and helpers for quitstat tests
//!
//! Profile fixtures are written to temporary directories; tests that touch
//! process environment variables serialize on [`ENV_MUTEX`].

use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use quitstat::types::{HabitProfile, QuitTimestamp};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Global mutex to serialize environment variable modifications in tests
#[allow(dead_code)]
pub static ENV_MUTEX: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

/// Fixed evaluation instant shared by the scenario tests
#[allow(dead_code)]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A profile that quit `minutes` before [`fixed_now`]
#[allow(dead_code)]
pub fn profile_quit_minutes_ago(
    minutes: i64,
    per_day: f64,
    per_pack: f64,
    price: f64,
) -> HabitProfile {
    let quit = QuitTimestamp::new(fixed_now() - Duration::minutes(minutes));
    HabitProfile::new(Some(quit), per_day, per_pack, price)
}

/// Restores an environment variable when dropped
#[allow(dead_code)]
pub struct EnvVarGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvVarGuard {
    #[allow(dead_code)]
    pub fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let original = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, original }
    }

    #[allow(dead_code)]
    pub fn remove(key: &'static str) -> Self {
        let original = std::env::var(key).ok();
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

/// Temporary directory holding a `profile.json`
#[allow(dead_code)]
pub struct ProfileFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl ProfileFixture {
    /// Write `document` as the profile store
    #[allow(dead_code)]
    pub async fn new(document: &Value) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        tokio::fs::write(&path, serde_json::to_vec_pretty(document).unwrap())
            .await
            .unwrap();
        Self { _dir: dir, path }
    }

    /// Write raw text, for malformed-document tests
    #[allow(dead_code)]
    pub async fn raw(contents: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        tokio::fs::write(&path, contents).await.unwrap();
        Self { _dir: dir, path }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A typical nested profile document
#[allow(dead_code)]
pub fn sample_document(quit_date: &str) -> Value {
    json!({
        "profile": {
            "quitDate": quit_date,
            "cigarettesPerDay": 20,
            "cigarettesPerPack": 20,
            "pricePerPack": 10,
            "currency": "USD",
            "yearsSmoking": 1
        },
        "usage": {
            "breathingExercises": 12,
            "copingStrategiesUsed": 2,
            "consecutiveDays": 10
        }
    })
}
