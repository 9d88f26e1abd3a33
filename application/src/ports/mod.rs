//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod credential_store;
pub mod delivery_log;
pub mod mail_gateway;
pub mod mailbox;
pub mod progress;
pub mod resource_catalog;
pub mod state_store;
