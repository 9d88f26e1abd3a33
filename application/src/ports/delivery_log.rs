//! Port for structured delivery logging.
//!
//! Defines the [`DeliveryLogger`] trait for recording delivery events
//! (batch start, per-message outcomes, batch completion) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the durable
//! delivery trail in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured delivery event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The timestamp is added at write time.
pub struct DeliveryEvent {
    /// Event type identifier (e.g., "message_sent", "batch_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DeliveryEvent {
    /// Create a new delivery event.
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging delivery events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is intentionally synchronous and non-fallible to avoid
/// disrupting dispatch — logging failures are silently ignored.
pub trait DeliveryLogger: Send + Sync {
    /// Record a delivery event.
    fn log(&self, event: DeliveryEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoDeliveryLogger;

impl DeliveryLogger for NoDeliveryLogger {
    fn log(&self, _event: DeliveryEvent) {}
}
