//! Send outreach use case
//!
//! Dispatches composed outreach emails through the mail gateway, one task
//! per message, and aggregates the per-message outcomes into a report.

use crate::config::DeliveryPolicy;
use crate::ports::delivery_log::{DeliveryEvent, DeliveryLogger, NoDeliveryLogger};
use crate::ports::mail_gateway::{MailGateway, TransportError};
use crate::ports::progress::{DeliveryProgress, NoProgress};
use askedith_domain::delivery::{DeliveryOutcome, DeliveryReport, OutboundEmail, SendReceipt};
use askedith_domain::outreach::OutreachEmail;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Input for the SendOutreach use case
#[derive(Debug, Clone)]
pub struct SendOutreachInput {
    /// The messages to dispatch
    pub emails: Vec<OutboundEmail>,
}

impl SendOutreachInput {
    pub fn new(emails: Vec<OutboundEmail>) -> Self {
        Self { emails }
    }

    /// Build dispatch input from composed drafts, setting the caregiver's
    /// address as reply-to so providers answer the family directly.
    pub fn from_drafts(drafts: &[OutreachEmail], reply_to: Option<&str>) -> Self {
        let emails = drafts
            .iter()
            .map(|draft| OutboundEmail::from_outreach(draft, reply_to.map(str::to_owned)))
            .collect();
        Self { emails }
    }
}

/// Use case for dispatching outreach emails
pub struct SendOutreachUseCase<G: MailGateway + 'static> {
    gateway: Arc<G>,
    policy: DeliveryPolicy,
    delivery_log: Arc<dyn DeliveryLogger>,
}

impl<G: MailGateway + 'static> SendOutreachUseCase<G> {
    pub fn new(gateway: Arc<G>, policy: DeliveryPolicy) -> Self {
        Self {
            gateway,
            policy,
            delivery_log: Arc::new(NoDeliveryLogger),
        }
    }

    /// Attach a structured delivery log
    pub fn with_delivery_log(mut self, log: Arc<dyn DeliveryLogger>) -> Self {
        self.delivery_log = log;
        self
    }

    /// Send a single message and report its outcome
    pub async fn send_one(&self, email: &OutboundEmail) -> DeliveryOutcome {
        let result = Self::attempt(&self.gateway, email, self.policy.send_timeout).await;
        let outcome = match result {
            Ok(receipt) => DeliveryOutcome::sent(email.to.clone(), receipt),
            Err(e) => DeliveryOutcome::failed(email.to.clone(), e.to_string()),
        };
        self.log_outcome(&outcome);
        outcome
    }

    /// Dispatch the whole batch without progress display
    pub async fn execute(&self, input: SendOutreachInput) -> DeliveryReport {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Dispatch the whole batch with progress callbacks
    ///
    /// Every message is attempted independently and concurrently; one
    /// failure never aborts the rest. The report's results preserve the
    /// input order.
    pub async fn execute_with_progress(
        &self,
        input: SendOutreachInput,
        progress: &dyn DeliveryProgress,
    ) -> DeliveryReport {
        let total = input.emails.len();
        info!("Dispatching outreach batch of {} messages", total);
        self.delivery_log.log(DeliveryEvent::new(
            "batch_started",
            json!({ "total": total }),
        ));
        progress.on_batch_start(total);

        let mut join_set = JoinSet::new();

        for (index, email) in input.emails.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let email = email.clone();
            let timeout = self.policy.send_timeout;

            join_set.spawn(async move {
                let result = Self::attempt(&gateway, &email, timeout).await;
                (index, email.to, result)
            });
        }

        let mut slots: Vec<Option<DeliveryOutcome>> = (0..total).map(|_| None).collect();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, to, Ok(receipt))) => {
                    info!("Sent to {} via {}", to, receipt.transport);
                    progress.on_message_complete(&to, true);
                    slots[index] = Some(DeliveryOutcome::sent(to, receipt));
                }
                Ok((index, to, Err(e))) => {
                    warn!("Send to {} failed: {}", to, e);
                    progress.on_message_complete(&to, false);
                    slots[index] = Some(DeliveryOutcome::failed(to, e.to_string()));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A panicked task leaves its slot empty; count it as a failure
        // rather than dropping the message from the report.
        for (index, slot) in slots.iter_mut().enumerate() {
            if slot.is_none() {
                let to = input.emails[index].to.clone();
                progress.on_message_complete(&to, false);
                *slot = Some(DeliveryOutcome::failed(to, "delivery task failed"));
            }
        }

        let outcomes: Vec<DeliveryOutcome> = slots.into_iter().flatten().collect();
        for outcome in &outcomes {
            self.log_outcome(outcome);
        }

        let report = DeliveryReport::from_outcomes(outcomes);
        info!(
            "Batch complete: {} sent, {} failed of {}",
            report.sent, report.failed, report.total
        );
        self.delivery_log.log(DeliveryEvent::new(
            "batch_completed",
            json!({
                "sent": report.sent,
                "failed": report.failed,
                "total": report.total,
                "status": format!("{:?}", report.status()),
            }),
        ));
        progress.on_batch_complete(&report);
        report
    }

    /// Attempt one send within the per-message timeout
    async fn attempt(
        gateway: &G,
        email: &OutboundEmail,
        timeout: Duration,
    ) -> Result<SendReceipt, TransportError> {
        match tokio::time::timeout(timeout, gateway.send(email)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout),
        }
    }

    fn log_outcome(&self, outcome: &DeliveryOutcome) {
        if outcome.success {
            self.delivery_log.log(DeliveryEvent::new(
                "message_sent",
                json!({
                    "to": outcome.to,
                    "transport": outcome.transport.as_ref().map(|t| t.as_str()),
                    "message_id": outcome.message_id,
                }),
            ));
        } else {
            self.delivery_log.log(DeliveryEvent::new(
                "message_failed",
                json!({
                    "to": outcome.to,
                    "error": outcome.error,
                }),
            ));
        }
    }
}
