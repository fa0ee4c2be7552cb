//! Profile loader for the habit profile and usage counters
//!
//! The profile store is a single JSON document:
//!
//! ```json
//! {
//!   "profile": {
//!     "quitDate": "2024-03-01T08:30:00Z",
//!     "cigarettesPerDay": 20,
//!     "cigarettesPerPack": 20,
//!     "pricePerPack": 10.5,
//!     "currency": "EUR",
//!     "yearsSmoking": 12
//!   },
//!   "usage": {
//!     "breathingExercises": 4,
//!     "copingStrategiesUsed": 2,
//!     "consecutiveDays": 9
//!   }
//! }
//! ```
//!
//! A flat document with the profile and usage fields side by side at the top
//! level is accepted as well.
//!
//! # Location
//!
//! The first of these wins:
//! - an explicit path (the `--profile` flag)
//! - the `QUITSTAT_PROFILE` environment variable
//! - `quitstat/profile.json` under the platform config directory
//!   (`~/.config` on Linux, `~/Library/Application Support` on macOS,
//!   `%APPDATA%` on Windows)

use crate::error::{QuitstatError, Result};
use quitstat_core::types::{HabitProfile, RawHabitProfile, UsageCounters};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the profile location
pub const PROFILE_ENV_VAR: &str = "QUITSTAT_PROFILE";

/// On-disk shape of the profile store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(default)]
    pub profile: RawHabitProfile,
    #[serde(default)]
    pub usage: UsageCounters,
}

impl ProfileDocument {
    /// Parse either the nested or the flat document layout
    pub fn from_json(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)?;
        let Value::Object(fields) = &value else {
            return Err(QuitstatError::Config(
                "profile document must be a JSON object".to_string(),
            ));
        };

        if fields.contains_key("profile") || fields.contains_key("usage") {
            return Ok(serde_json::from_value(value)?);
        }

        debug!("Reading flat profile document");
        Ok(Self {
            profile: serde_json::from_value(value.clone())?,
            usage: serde_json::from_value(value)?,
        })
    }
}

/// A normalised profile together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProfile {
    pub profile: HabitProfile,
    pub usage: UsageCounters,
    pub path: PathBuf,
}

/// Reads the profile store from a resolved location
#[derive(Debug, Clone)]
pub struct ProfileLoader {
    path: PathBuf,
}

impl ProfileLoader {
    /// Create a loader, resolving the location as described in the module docs
    ///
    /// # Errors
    ///
    /// Returns [`QuitstatError::Config`] if no path was given and the platform
    /// has no config directory.
    pub fn new(explicit: Option<PathBuf>) -> Result<Self> {
        let path = Self::resolve_path(explicit)?;
        debug!("Using profile at {}", path.display());
        Ok(Self { path })
    }

    /// Loader for a known path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path);
        }

        if let Ok(custom_path) = std::env::var(PROFILE_ENV_VAR)
            && !custom_path.trim().is_empty()
        {
            return Ok(PathBuf::from(custom_path));
        }

        dirs::config_dir()
            .map(|dir| dir.join("quitstat").join("profile.json"))
            .ok_or_else(|| {
                QuitstatError::Config(format!(
                    "could not determine a config directory; pass --profile or set {PROFILE_ENV_VAR}"
                ))
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and normalise the profile
    ///
    /// # Errors
    ///
    /// - [`QuitstatError::ProfileNotFound`] if the file does not exist
    /// - [`QuitstatError::Io`] for other read failures
    /// - [`QuitstatError::Json`] or [`QuitstatError::Config`] for malformed documents
    pub async fn load(&self) -> Result<LoadedProfile> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(QuitstatError::ProfileNotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let document = ProfileDocument::from_json(&contents)?;
        let profile = HabitProfile::from_raw(&document.profile);
        if profile.quit_timestamp().is_none() {
            debug!("Profile at {} has no usable quit date", self.path.display());
        }

        Ok(LoadedProfile {
            profile,
            usage: document.usage,
            path: self.path.clone(),
        })
    }
}
