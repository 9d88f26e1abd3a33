//! Console/log simulation transport

use super::TransportAdapter;
use askedith_application::ports::delivery_log::{DeliveryEvent, DeliveryLogger};
use askedith_application::ports::mail_gateway::TransportError;
use askedith_domain::delivery::{OutboundEmail, SendReceipt, TransportKind};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

static SIMULATED_COUNTER: AtomicU64 = AtomicU64::new(0);

fn synthesized_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let n = SIMULATED_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("sim-{millis}-{n}")
}

/// Last-resort transport that records the send instead of performing it
///
/// Always usable, so a batch never dies for lack of configuration. The
/// would-be message lands on the console and in the delivery log.
pub struct SimulationTransport {
    delivery_log: Arc<dyn DeliveryLogger>,
}

impl SimulationTransport {
    pub fn new(delivery_log: Arc<dyn DeliveryLogger>) -> Self {
        Self { delivery_log }
    }
}

#[async_trait]
impl TransportAdapter for SimulationTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Simulation
    }

    async fn is_usable(&self) -> bool {
        true
    }

    async fn deliver(&self, email: &OutboundEmail) -> Result<SendReceipt, TransportError> {
        let id = synthesized_id();

        println!(
            "[simulated] {} <- \"{}\" ({})",
            email.to, email.subject, email.category
        );
        info!("Simulated send to {} as {}", email.to, id);

        self.delivery_log.log(DeliveryEvent::new(
            "simulated_send",
            json!({
                "message_id": id,
                "to": email.to,
                "subject": email.subject,
                "body": email.body,
                "category": email.category.as_str(),
            }),
        ));

        Ok(SendReceipt::new(TransportKind::Simulation, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askedith_domain::resource::Category;
    use std::sync::Mutex;

    struct RecordingLog {
        events: Mutex<Vec<(String, serde_json::Value)>>,
    }

    impl RecordingLog {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }
    }

    impl DeliveryLogger for RecordingLog {
        fn log(&self, event: DeliveryEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type.to_string(), event.payload));
        }
    }

    #[tokio::test]
    async fn always_usable_and_always_succeeds() {
        let log = Arc::new(RecordingLog::new());
        let transport = SimulationTransport::new(log);

        assert!(transport.is_usable().await);

        let email = OutboundEmail::new("a@example.com", "s", "b", Category::Hospice);
        let receipt = transport.deliver(&email).await.unwrap();

        assert_eq!(receipt.transport, TransportKind::Simulation);
        assert!(receipt.message_id.unwrap().starts_with("sim-"));
    }

    #[tokio::test]
    async fn records_the_would_be_send() {
        let log = Arc::new(RecordingLog::new());
        let transport = SimulationTransport::new(log.clone());

        let email = OutboundEmail::new(
            "intake@provider.example.com",
            "Care inquiry",
            "Hello there",
            Category::HomeCare,
        );
        transport.deliver(&email).await.unwrap();

        let events = log.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let (event_type, payload) = &events[0];
        assert_eq!(event_type, "simulated_send");
        assert_eq!(payload["to"], "intake@provider.example.com");
        assert_eq!(payload["subject"], "Care inquiry");
        assert_eq!(payload["body"], "Hello there");
        assert_eq!(payload["category"], "Home Care");
    }

    #[tokio::test]
    async fn ids_are_unique_within_a_run() {
        let transport = SimulationTransport::new(Arc::new(RecordingLog::new()));
        let email = OutboundEmail::new("a@example.com", "s", "b", Category::HomeCare);

        let first = transport.deliver(&email).await.unwrap();
        let second = transport.deliver(&email).await.unwrap();
        assert_ne!(first.message_id, second.message_id);
    }
}
