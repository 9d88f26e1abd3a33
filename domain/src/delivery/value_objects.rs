//! Delivery value objects

use serde::{Deserialize, Serialize};

use crate::outreach::OutreachEmail;
use crate::resource::entities::Category;

/// Which transport carried (or would have carried) a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// The caregiver's own connected mailbox
    Mailbox,
    /// Transactional email API with the platform as technical sender
    Transactional,
    /// Console/log simulation, always available
    Simulation,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Mailbox => "mailbox",
            TransportKind::Transactional => "transactional",
            TransportKind::Simulation => "simulation",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Category label used for foldering and logging
    pub category: Category,
    /// Caregiver's address; transactional sends set it as reply-to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl OutboundEmail {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            category,
            reply_to: None,
        }
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Build the wire-level message from a composed draft
    pub fn from_outreach(draft: &OutreachEmail, reply_to: Option<String>) -> Self {
        Self {
            to: draft.to.clone(),
            subject: draft.subject.clone(),
            body: draft.body.clone(),
            category: draft.category.clone(),
            reply_to,
        }
    }
}

/// Successful hand-off to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Provider-assigned id, when the provider reports one
    pub message_id: Option<String>,
    pub transport: TransportKind,
}

impl SendReceipt {
    pub fn new(transport: TransportKind, message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            transport,
        }
    }

    pub fn without_id(transport: TransportKind) -> Self {
        Self {
            message_id: None,
            transport,
        }
    }
}

/// What happened to one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub to: String,
    pub success: bool,
    /// Transport that handled the message; `None` when it never got one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub fn sent(to: impl Into<String>, receipt: SendReceipt) -> Self {
        Self {
            to: to.into(),
            success: true,
            transport: Some(receipt.transport),
            message_id: receipt.message_id,
            error: None,
        }
    }

    pub fn failed(to: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            success: false,
            transport: None,
            message_id: None,
            error: Some(error.into()),
        }
    }

    pub fn failed_via(
        to: impl Into<String>,
        transport: TransportKind,
        error: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            success: false,
            transport: Some(transport),
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregate outcome of a batch send
///
/// Total success, partial failure, and total failure are three distinct
/// outcomes; callers must not collapse them into one boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    AllSent,
    PartialFailure,
    AllFailed,
}

/// Result of sending a batch of messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    /// Per-message outcomes, in input order
    pub results: Vec<DeliveryOutcome>,
}

impl DeliveryReport {
    pub fn from_outcomes(results: Vec<DeliveryOutcome>) -> Self {
        let sent = results.iter().filter(|r| r.success).count();
        let failed = results.len() - sent;
        Self {
            sent,
            failed,
            total: results.len(),
            results,
        }
    }

    pub fn status(&self) -> BatchStatus {
        if self.failed == 0 {
            BatchStatus::AllSent
        } else if self.sent == 0 {
            BatchStatus::AllFailed
        } else {
            BatchStatus::PartialFailure
        }
    }

    /// Outcomes that failed and are worth retrying individually
    pub fn failures(&self) -> impl Iterator<Item = &DeliveryOutcome> {
        self.results.iter().filter(|r| !r.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(to: &str) -> DeliveryOutcome {
        DeliveryOutcome::sent(to, SendReceipt::new(TransportKind::Simulation, "sim-1"))
    }

    fn bad(to: &str) -> DeliveryOutcome {
        DeliveryOutcome::failed(to, "connection refused")
    }

    #[test]
    fn test_outcome_constructors() {
        let sent = ok("a@example.com");
        assert!(sent.success);
        assert_eq!(sent.transport, Some(TransportKind::Simulation));
        assert_eq!(sent.message_id.as_deref(), Some("sim-1"));
        assert!(sent.error.is_none());

        let failed = bad("b@example.com");
        assert!(!failed.success);
        assert!(failed.message_id.is_none());
        assert_eq!(failed.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_report_counts() {
        let report = DeliveryReport::from_outcomes(vec![
            ok("a@example.com"),
            bad("b@example.com"),
            ok("c@example.com"),
        ]);

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total, 3);
        assert_eq!(report.results.len(), 3);
    }

    #[test]
    fn test_status_is_three_valued() {
        let all = DeliveryReport::from_outcomes(vec![ok("a"), ok("b")]);
        assert_eq!(all.status(), BatchStatus::AllSent);

        let partial = DeliveryReport::from_outcomes(vec![ok("a"), bad("b")]);
        assert_eq!(partial.status(), BatchStatus::PartialFailure);

        let none = DeliveryReport::from_outcomes(vec![bad("a"), bad("b")]);
        assert_eq!(none.status(), BatchStatus::AllFailed);
    }

    #[test]
    fn test_failures_are_retryable_individually() {
        let report = DeliveryReport::from_outcomes(vec![ok("a"), bad("b"), bad("c")]);
        let failed: Vec<_> = report.failures().map(|o| o.to.as_str()).collect();
        assert_eq!(failed, vec!["b", "c"]);
    }

    #[test]
    fn test_transport_kind_strings() {
        assert_eq!(TransportKind::Mailbox.to_string(), "mailbox");
        assert_eq!(
            serde_json::to_string(&TransportKind::Transactional).unwrap(),
            "\"transactional\""
        );
    }
}
