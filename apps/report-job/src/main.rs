//! # Atlas Report Job
//!
//! Run-once daily sales report generator.
//!
//! ## Run Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        report-job [config.toml]                         │
//! │                                                                         │
//! │  Data/Sale.csv ──┐                                                     │
//! │                  ├──► join ──► aggregate ──► Reports/daily_report_*.xlsx│
//! │  Data/Price.csv ─┘                                                     │
//! │                                                                         │
//! │  Exit 0: report written.  Exit 1: any stage failed, error on stderr.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use report_job::{JobConfig, Pipeline};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting daily report run");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = JobConfig::load(config_path.as_deref())?;

    if config.email.enabled {
        // Chart rendering and SMTP are deployment-specific collaborators;
        // this binary ships without them wired in.
        warn!("Email is enabled in config but no mail transport is built into this binary");
    }

    let today = chrono::Local::now().date_naive();
    match Pipeline::new(config).run(today) {
        Ok(path) => {
            info!(path = %path.display(), "Daily report complete");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "Daily report failed");
            Err(err.into())
        }
    }
}
