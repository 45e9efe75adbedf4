//! # Email Payload Assembly
//!
//! Builds the daily summary email from the four scalar totals and two
//! pre-rendered chart blobs.
//!
//! ## Payload Shape
//! ```text
//! subject:  "Enterprise Sales Payment & Dispatch Report"
//! html:     four currency totals + <img src="cid:payment"> / cid:dispatch
//! images:   [payment -> PNG blob, dispatch -> PNG blob]
//! ```
//!
//! Assembly is pure: no network I/O happens here. Sending is the
//! [`MailTransport`] collaborator's job, and the pipeline treats a send
//! failure as log-and-continue because the report file already exists.

use serde::{Deserialize, Serialize};
use tracing::info;

use atlas_core::Totals;

use crate::error::NotifyResult;

/// Subject line of the daily summary email.
pub const EMAIL_SUBJECT: &str = "Enterprise Sales Payment & Dispatch Report";

/// Content-id of the payment chart image.
pub const PAYMENT_CHART_CID: &str = "payment";
/// Content-id of the dispatch chart image.
pub const DISPATCH_CHART_CID: &str = "dispatch";

// =============================================================================
// Payload Types
// =============================================================================

/// One inline image, referenced from the HTML body via `cid:<content_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub content_id: String,
    pub bytes: Vec<u8>,
}

/// The assembled email, ready for a [`MailTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPayload {
    pub subject: String,
    pub html_body: String,
    pub inline_images: Vec<InlineImage>,
}

/// The two chart blobs the email embeds, produced by a [`ChartRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSet {
    pub payment: Vec<u8>,
    pub dispatch: Vec<u8>,
}

/// Sender and recipient addresses for one send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub sender: String,
    pub recipient: String,
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// A collaborator that draws one comparison chart from two labeled
/// amounts, returning an encoded image blob.
pub trait ChartRenderer {
    fn render_comparison(
        &self,
        chart: &str,
        left: (&str, atlas_core::Money),
        right: (&str, atlas_core::Money),
    ) -> NotifyResult<Vec<u8>>;
}

/// A collaborator that hands one assembled email to the outside world.
///
/// Implementations own credentials and connection handling; this crate
/// never sees them.
pub trait MailTransport {
    fn send(&self, envelope: &Envelope, payload: &EmailPayload) -> NotifyResult<()>;
}

// =============================================================================
// Assembly
// =============================================================================

/// Assembles the summary email from totals and pre-rendered charts.
///
/// Pure function: same totals and blobs produce a byte-identical payload.
pub fn build_email(totals: &Totals, charts: ChartSet) -> EmailPayload {
    let html_body = format!(
        "<html>\
         <body>\
         <h2>{EMAIL_SUBJECT}</h2>\
         <table border=\"0\" cellpadding=\"4\">\
         <tr><td>Paid</td><td align=\"right\">{paid}</td></tr>\
         <tr><td>Unpaid</td><td align=\"right\">{unpaid}</td></tr>\
         <tr><td>Dispatched</td><td align=\"right\">{dispatched}</td></tr>\
         <tr><td>Not Dispatched</td><td align=\"right\">{undispatched}</td></tr>\
         </table>\
         <p><img src=\"cid:{PAYMENT_CHART_CID}\" alt=\"Payment status\"/></p>\
         <p><img src=\"cid:{DISPATCH_CHART_CID}\" alt=\"Dispatch status\"/></p>\
         </body>\
         </html>",
        paid = totals.paid,
        unpaid = totals.unpaid,
        dispatched = totals.dispatched,
        undispatched = totals.undispatched,
    );

    EmailPayload {
        subject: EMAIL_SUBJECT.to_string(),
        html_body,
        inline_images: vec![
            InlineImage {
                content_id: PAYMENT_CHART_CID.to_string(),
                bytes: charts.payment,
            },
            InlineImage {
                content_id: DISPATCH_CHART_CID.to_string(),
                bytes: charts.dispatch,
            },
        ],
    }
}

/// Renders both charts, assembles the payload, and hands it to the
/// transport.
///
/// The convenience entry point for callers holding the two collaborators.
/// Chart failures abort (there is nothing sensible to send without the
/// images the body references); transport failures propagate so the
/// caller can apply its log-and-continue policy.
pub fn send_summary(
    totals: &Totals,
    renderer: &dyn ChartRenderer,
    transport: &dyn MailTransport,
    envelope: &Envelope,
) -> NotifyResult<()> {
    let charts = ChartSet {
        payment: renderer.render_comparison(
            PAYMENT_CHART_CID,
            ("Paid", totals.paid),
            ("Unpaid", totals.unpaid),
        )?,
        dispatch: renderer.render_comparison(
            DISPATCH_CHART_CID,
            ("Dispatched", totals.dispatched),
            ("Not Dispatched", totals.undispatched),
        )?,
    };

    let payload = build_email(totals, charts);
    transport.send(envelope, &payload)?;

    info!(
        recipient = %envelope.recipient,
        subject = %payload.subject,
        "Summary email handed to transport"
    );
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
