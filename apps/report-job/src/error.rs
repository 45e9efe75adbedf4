//! # Job Error Types
//!
//! The operator-facing error type: every stage failure funnels into
//! [`JobError`], so the exit path can name the stage that failed.
//!
//! ## Error Flow
//! ```text
//! ValidationError ──► CoreError ──┐
//! SheetError ─────────────────────┼──► JobError ──► main() ──► exit code 1
//! NotifyError ────────────────────┘        ▲
//! csv / toml / io failures ───────────────┘ (with path context attached)
//! ```

use std::path::PathBuf;

use thiserror::Error;

use atlas_core::{CoreError, ValidationError};
use atlas_notify::NotifyError;
use atlas_sheet::SheetError;

/// Result type alias for job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Top-level error for one report run.
#[derive(Debug, Error)]
pub enum JobError {
    /// Join / aggregation / layout failure.
    #[error("Data calculation failed: {0}")]
    Core(#[from] CoreError),

    /// Spreadsheet rendering or file output failure.
    #[error("Report generation failed: {0}")]
    Sheet(#[from] SheetError),

    /// Notification assembly failure (transport failures are logged by the
    /// pipeline instead of surfacing here).
    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),

    /// A raw input table could not be read at all.
    #[error("Failed to read input table {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// One row of a raw input table failed to parse.
    #[error("Bad record in {path} at line {line}: {message}")]
    InputRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// The config file could not be read.
    #[error("Failed to load config {path}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::JobConfig`].
    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Record-level validation failures route through CoreError so the
/// taxonomy stays in one place.
impl From<ValidationError> for JobError {
    fn from(err: ValidationError) -> Self {
        JobError::Core(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_is_visible_in_the_message() {
        let err: JobError = CoreError::EmptyInput.into();
        assert!(err.to_string().starts_with("Data calculation failed"));
    }

    #[test]
    fn test_validation_error_routes_through_core() {
        let err: JobError = ValidationError::Required {
            field: "order_id".to_string(),
        }
        .into();
        assert!(matches!(err, JobError::Core(CoreError::Validation(_))));
    }
}
