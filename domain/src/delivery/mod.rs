//! Delivery domain
//!
//! Value objects describing what was sent and what happened: the wire-level
//! [`OutboundEmail`], per-message [`DeliveryOutcome`]s, and the aggregate
//! [`DeliveryReport`].

pub mod value_objects;

// Re-export main types
pub use value_objects::{
    BatchStatus, DeliveryOutcome, DeliveryReport, OutboundEmail, SendReceipt, TransportKind,
};
