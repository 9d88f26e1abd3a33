//! Outreach composition domain
//!
//! Turns a resource plus the caregiver's answers into one deterministic
//! outreach email per selected resource.

pub mod compose;
pub mod message;

// Re-export main types
pub use compose::{NOT_SPECIFIED, compose, compose_batch};
pub use message::OutreachEmail;
