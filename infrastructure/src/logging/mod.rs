//! Logging infrastructure — structured delivery logging.
//!
//! Provides [`JsonlDeliveryLog`], a JSONL file writer that implements
//! the [`DeliveryLogger`](askedith_application::DeliveryLogger) port.

mod delivery_log;

pub use delivery_log::JsonlDeliveryLog;
