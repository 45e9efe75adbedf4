//! # Job Configuration
//!
//! Configuration for one report run.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ATLAS_SALES_PATH=/exports/Sale.csv                                 │
//! │     ATLAS_PRICES_PATH=/exports/Price.csv                               │
//! │     ATLAS_REPORT_DIR=/srv/reports                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ./report-job.toml (or the path given on the command line)          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Data/Sale.csv, Data/Price.csv, Reports/, gap 3, email off          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report-job.toml
//! [data]
//! sales_path = "Data/Sale.csv"
//! prices_path = "Data/Price.csv"
//!
//! [report]
//! output_dir = "Reports"
//! block_gap = 3
//!
//! [email]
//! enabled = false
//! sender = "reports@example.com"
//! recipient = "ops@example.com"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{JobError, JobResult};

/// File the job looks for when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "report-job.toml";

// =============================================================================
// Sections
// =============================================================================

/// Where the two raw tables come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub sales_path: PathBuf,
    pub prices_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            sales_path: PathBuf::from("Data/Sale.csv"),
            prices_path: PathBuf::from("Data/Price.csv"),
        }
    }
}

/// Where and how the report file is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,

    /// Spacing constant between stacked blocks (see atlas-core's layout).
    pub block_gap: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            output_dir: PathBuf::from("Reports"),
            block_gap: atlas_core::DEFAULT_BLOCK_GAP,
        }
    }
}

/// Summary email settings. Addresses are only consulted when a mail
/// transport collaborator is wired into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub enabled: bool,
    pub sender: String,
    pub recipient: String,
}

// =============================================================================
// JobConfig
// =============================================================================

/// Full configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub data: DataConfig,
    pub report: ReportConfig,
    pub email: EmailConfig,
}

impl JobConfig {
    /// Loads configuration with the file/env layering described in the
    /// module docs.
    ///
    /// With an explicit `path` the file must exist; without one, a missing
    /// `report-job.toml` silently falls back to defaults, so the job runs
    /// with zero configuration in a conventional working directory.
    pub fn load(path: Option<&Path>) -> JobResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No config file found, using defaults");
                    JobConfig::default()
                }
            }
        };

        config.apply_env_overrides();
        info!(
            sales = %config.data.sales_path.display(),
            prices = %config.data.prices_path.display(),
            output = %config.report.output_dir.display(),
            email_enabled = config.email.enabled,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn from_file(path: &Path) -> JobResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| JobError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| JobError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("ATLAS_SALES_PATH") {
            self.data.sales_path = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var("ATLAS_PRICES_PATH") {
            self.data.prices_path = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var("ATLAS_REPORT_DIR") {
            self.report.output_dir = PathBuf::from(value);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_conventional_layout() {
        let config = JobConfig::default();
        assert_eq!(config.data.sales_path, PathBuf::from("Data/Sale.csv"));
        assert_eq!(config.data.prices_path, PathBuf::from("Data/Price.csv"));
        assert_eq!(config.report.output_dir, PathBuf::from("Reports"));
        assert_eq!(config.report.block_gap, 3);
        assert!(!config.email.enabled);
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let config: JobConfig = toml::from_str(
            r#"
            [report]
            output_dir = "/srv/reports"
            "#,
        )
        .unwrap();
        assert_eq!(config.report.output_dir, PathBuf::from("/srv/reports"));
        assert_eq!(config.report.block_gap, 3);
        assert_eq!(config.data.sales_path, PathBuf::from("Data/Sale.csv"));
    }

    #[test]
    fn test_full_toml_round_trip() {
        let config: JobConfig = toml::from_str(
            r#"
            [data]
            sales_path = "in/s.csv"
            prices_path = "in/p.csv"

            [report]
            output_dir = "out"
            block_gap = 5

            [email]
            enabled = true
            sender = "a@example.com"
            recipient = "b@example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.report.block_gap, 5);
        assert!(config.email.enabled);
        assert_eq!(config.email.recipient, "b@example.com");
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let result: Result<JobConfig, _> = toml::from_str("report = 7");
        assert!(result.is_err());
    }
}
