//! # atlas-notify: Email Payload Assembly for Atlas Reports
//!
//! Assembles the daily summary email: fixed subject, HTML body embedding
//! the four currency totals, and two inline chart images referenced by
//! content-id (`cid:payment`, `cid:dispatch`).
//!
//! ## Modules
//!
//! - [`email`] - Payload types, `build_email`, `send_summary`, and the
//!   `ChartRenderer` / `MailTransport` collaborator traits
//! - [`error`] - Notify error types
//!
//! ## Design Principles
//!
//! 1. **Pure assembly**: no network I/O, no image drawing - both are
//!    collaborator traits owned by the caller
//! 2. **Non-fatal transport**: the report file is already written when the
//!    email goes out; a send failure is logged, never rolled back into a
//!    failed run

pub mod email;
pub mod error;

pub use email::{
    build_email, send_summary, ChartRenderer, ChartSet, EmailPayload, Envelope, InlineImage,
    MailTransport, DISPATCH_CHART_CID, EMAIL_SUBJECT, PAYMENT_CHART_CID,
};
pub use error::{NotifyError, NotifyResult};
