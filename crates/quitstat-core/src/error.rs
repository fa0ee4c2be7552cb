//! Error types for quitstat
//!
//! The calculation engine is total and has no error type in its signatures.
//! [`QuitstatError`] covers what surrounds it: reading the profile store,
//! parsing `--now` and resolving time zones.
//!
//! ```
//! use quitstat_core::error::{QuitstatError, Result};
//!
//! fn read_store(path: &str) -> Result<String> {
//!     Ok(std::fs::read_to_string(path)?)
//! }
//!
//! assert!(matches!(read_store("/nonexistent/profile.json"), Err(QuitstatError::Io(_))));
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuitstatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing exists at the resolved profile location
    #[error("No profile found at {}", .0.display())]
    ProfileNotFound(PathBuf),

    /// A user-supplied instant that none of the accepted layouts match
    #[error("invalid timestamp {0}")]
    InvalidTimestamp(String),

    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),

    /// The profile location could not be determined or the document has the
    /// wrong shape
    #[error("configuration problem: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, QuitstatError>;
