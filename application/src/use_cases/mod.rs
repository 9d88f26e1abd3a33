//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod connect_mailbox;
pub mod fetch_resources;
pub mod send_outreach;
pub mod wizard_controller;
