//! # report-job: Atlas Daily Report Runner
//!
//! The run-once binary behind the `report-job` command. Library layout
//! exists so integration tests can drive the pipeline directly.
//!
//! ## Modules
//!
//! - [`config`] - TOML + environment configuration for one run
//! - [`source`] - CSV ingestion into typed records
//! - [`pipeline`] - Stage orchestration and failure policy
//! - [`error`] - Operator-facing error type

pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;

pub use config::JobConfig;
pub use error::{JobError, JobResult};
pub use pipeline::{Notifier, Pipeline};
