//! # Notify Error Types
//!
//! Error types for notification assembly and the collaborator seams.
//!
//! Transport failures are deliberately NOT fatal to the run: by the time
//! the email goes out the report file is already on disk, and a mail
//! outage must not roll that back. The pipeline logs the failure and
//! exits successfully.

use thiserror::Error;

/// Result type alias for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Notification errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The chart collaborator failed to produce an image blob.
    #[error("Chart '{chart}' could not be rendered: {reason}")]
    ChartRender { chart: String, reason: String },

    /// The mail transport collaborator failed to hand the message off.
    #[error("Email to {recipient} could not be sent: {reason}")]
    Transport { recipient: String, reason: String },
}
