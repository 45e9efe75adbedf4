//! # Report Pipeline
//!
//! Runs the stages of one report in order and owns the failure policy
//! between them.
//!
//! ## Stage Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load ──► validate ──► join ──► aggregate ──► write XLSX ──► notify    │
//! │                                                                         │
//! │  Every stage up to the XLSX write is fatal: a report built from        │
//! │  partial or invalid input is worse than no report. The one exception   │
//! │  is a transport failure in the notify stage - the file is already on   │
//! │  disk, so a failed send is logged and the run still succeeds. A chart  │
//! │  render failure stays fatal: it means a collaborator is broken, not    │
//! │  that the mail server is down.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{info, warn};

use atlas_core::validation::validate_inputs;
use atlas_core::{aggregate, join, reduce_totals, CoreError};
use atlas_notify::{send_summary, ChartRenderer, Envelope, MailTransport, NotifyError};
use atlas_sheet::write_report;

use crate::config::JobConfig;
use crate::error::JobResult;
use crate::source;

// =============================================================================
// Notifier
// =============================================================================

/// The two collaborators and the addressing needed to send the summary
/// email. Held by the pipeline only when the caller wired one in.
pub struct Notifier {
    pub renderer: Box<dyn ChartRenderer>,
    pub transport: Box<dyn MailTransport>,
    pub envelope: Envelope,
}

// =============================================================================
// Pipeline
// =============================================================================

/// One configured report run.
pub struct Pipeline {
    config: JobConfig,
    notifier: Option<Notifier>,
}

impl Pipeline {
    /// A pipeline that only writes the report file.
    pub fn new(config: JobConfig) -> Self {
        Pipeline {
            config,
            notifier: None,
        }
    }

    /// A pipeline that also sends the summary email after the file is
    /// written.
    pub fn with_notifier(config: JobConfig, notifier: Notifier) -> Self {
        Pipeline {
            config,
            notifier: Some(notifier),
        }
    }

    /// Runs the full pipeline for `date` and returns the path of the
    /// written report.
    pub fn run(&self, date: NaiveDate) -> JobResult<PathBuf> {
        let sales = source::load_sales(&self.config.data.sales_path)?;
        let prices = source::load_prices(&self.config.data.prices_path)?;

        // A day with zero sales rows means the upstream export broke, not
        // that nothing was sold.
        if sales.is_empty() {
            return Err(CoreError::EmptyInput.into());
        }
        validate_inputs(&sales, &prices)?;

        let items = join(&sales, &prices)?;
        let aggregates = aggregate(&items);
        info!(
            line_items = items.len(),
            orders = aggregates.order_wise.len(),
            pending_payments = aggregates.pending_payments.len(),
            pending_departure = aggregates.pending_departure.len(),
            "Tables aggregated"
        );

        let path = write_report(
            &aggregates,
            &self.config.report.output_dir,
            date,
            self.config.report.block_gap,
        )?;

        if let Some(notifier) = &self.notifier {
            let totals = reduce_totals(&items);
            match send_summary(
                &totals,
                notifier.renderer.as_ref(),
                notifier.transport.as_ref(),
                &notifier.envelope,
            ) {
                Ok(()) => {}
                // The report exists on disk, so a failed send must not
                // fail the run.
                Err(err @ NotifyError::Transport { .. }) => {
                    warn!(error = %err, "Summary email failed, report was still written")
                }
                // A broken chart collaborator is a deployment bug, not a
                // mail outage
                Err(err @ NotifyError::ChartRender { .. }) => return Err(err.into()),
            }
        }

        Ok(path)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use std::rc::Rc;

    use atlas_core::Money;
    use atlas_notify::{EmailPayload, NotifyError, NotifyResult};

    use crate::config::JobConfig;
    use crate::error::JobError;

    const SALES_CSV: &str = "\
order_id,product_id,quantity,payment_state,departure_state
1,A,2,Unpaid,Not Dispatch
1,B,1,Unpaid,Not Dispatch
2,A,3,Paid,Dispatch
";

    const PRICES_CSV: &str = "\
product_id,product_name,unit_price
A,Widget,10
B,Gadget,2.5
";

    struct Workdir {
        root: PathBuf,
    }

    impl Workdir {
        fn new(tag: &str) -> Self {
            let root = std::env::temp_dir().join(format!(
                "report-job-test-{tag}-{}",
                std::process::id()
            ));
            fs::create_dir_all(root.join("Data")).unwrap();
            Workdir { root }
        }

        fn write(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.root.join(name);
            fs::write(&path, contents).unwrap();
            path
        }

        fn config(&self) -> JobConfig {
            let mut config = JobConfig::default();
            config.data.sales_path = self.root.join("Data/Sale.csv");
            config.data.prices_path = self.root.join("Data/Price.csv");
            config.report.output_dir = self.root.join("Reports");
            config
        }
    }

    impl Drop for Workdir {
        fn drop(&mut self) {
            fs::remove_dir_all(&self.root).ok();
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn test_run_writes_the_dated_report() {
        let dir = Workdir::new("happy");
        dir.write("Data/Sale.csv", SALES_CSV);
        dir.write("Data/Price.csv", PRICES_CSV);

        let path = Pipeline::new(dir.config()).run(date()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "daily_report_2026-08-29.xlsx"
        );
        assert!(path.exists());
    }

    #[test]
    fn test_empty_sales_table_fails_the_run() {
        let dir = Workdir::new("empty");
        dir.write(
            "Data/Sale.csv",
            "order_id,product_id,quantity,payment_state,departure_state\n",
        );
        dir.write("Data/Price.csv", PRICES_CSV);

        let err = Pipeline::new(dir.config()).run(date()).unwrap_err();
        assert!(matches!(err, JobError::Core(CoreError::EmptyInput)));
    }

    #[test]
    fn test_missing_sales_file_fails_with_the_path() {
        let dir = Workdir::new("missing");
        dir.write("Data/Price.csv", PRICES_CSV);

        let err = Pipeline::new(dir.config()).run(date()).unwrap_err();
        match err {
            JobError::InputRead { path, .. } => {
                assert!(path.ends_with(Path::new("Data/Sale.csv")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_price_row_fails_the_run() {
        let dir = Workdir::new("dup");
        dir.write("Data/Sale.csv", SALES_CSV);
        dir.write(
            "Data/Price.csv",
            "product_id,product_name,unit_price\nA,Widget,10\nA,Widget Again,12\n",
        );

        let err = Pipeline::new(dir.config()).run(date()).unwrap_err();
        assert!(matches!(
            err,
            JobError::Core(CoreError::DuplicateProductId { .. })
        ));
    }

    struct StubRenderer;

    impl ChartRenderer for StubRenderer {
        fn render_comparison(
            &self,
            chart: &str,
            _left: (&str, Money),
            _right: (&str, Money),
        ) -> NotifyResult<Vec<u8>> {
            Ok(chart.as_bytes().to_vec())
        }
    }

    struct CapturingTransport {
        sent: Rc<RefCell<Vec<EmailPayload>>>,
    }

    impl MailTransport for CapturingTransport {
        fn send(&self, _envelope: &Envelope, payload: &EmailPayload) -> NotifyResult<()> {
            self.sent.borrow_mut().push(payload.clone());
            Ok(())
        }
    }

    struct FailingTransport;

    impl MailTransport for FailingTransport {
        fn send(&self, envelope: &Envelope, _payload: &EmailPayload) -> NotifyResult<()> {
            Err(NotifyError::Transport {
                recipient: envelope.recipient.clone(),
                reason: "connection refused".to_string(),
            })
        }
    }

    fn envelope() -> Envelope {
        Envelope {
            sender: "reports@example.com".into(),
            recipient: "ops@example.com".into(),
        }
    }

    #[test]
    fn test_notifier_sends_after_the_file_is_written() {
        let dir = Workdir::new("notify");
        dir.write("Data/Sale.csv", SALES_CSV);
        dir.write("Data/Price.csv", PRICES_CSV);

        let sent = Rc::new(RefCell::new(Vec::new()));
        let notifier = Notifier {
            renderer: Box::new(StubRenderer),
            transport: Box::new(CapturingTransport { sent: sent.clone() }),
            envelope: envelope(),
        };

        let path = Pipeline::with_notifier(dir.config(), notifier)
            .run(date())
            .unwrap();
        assert!(path.exists());

        let sent = sent.borrow();
        assert_eq!(sent.len(), 1);
        // Unpaid total: order 1 is 2×$10 + 1×$2.50
        assert!(sent[0].html_body.contains("$22.50"));
    }

    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render_comparison(
            &self,
            chart: &str,
            _left: (&str, Money),
            _right: (&str, Money),
        ) -> NotifyResult<Vec<u8>> {
            Err(NotifyError::ChartRender {
                chart: chart.to_string(),
                reason: "image backend unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_chart_render_failure_fails_the_run() {
        let dir = Workdir::new("chart-fail");
        dir.write("Data/Sale.csv", SALES_CSV);
        dir.write("Data/Price.csv", PRICES_CSV);

        let notifier = Notifier {
            renderer: Box::new(FailingRenderer),
            transport: Box::new(CapturingTransport {
                sent: Rc::new(RefCell::new(Vec::new())),
            }),
            envelope: envelope(),
        };

        let err = Pipeline::with_notifier(dir.config(), notifier)
            .run(date())
            .unwrap_err();
        assert!(matches!(
            err,
            JobError::Notify(NotifyError::ChartRender { .. })
        ));
    }

    #[test]
    fn test_transport_failure_does_not_fail_the_run() {
        let dir = Workdir::new("notify-fail");
        dir.write("Data/Sale.csv", SALES_CSV);
        dir.write("Data/Price.csv", PRICES_CSV);

        let notifier = Notifier {
            renderer: Box::new(StubRenderer),
            transport: Box::new(FailingTransport),
            envelope: envelope(),
        };

        let path = Pipeline::with_notifier(dir.config(), notifier)
            .run(date())
            .unwrap();
        assert!(path.exists());
    }
}
