//! Output formatting
//!
//! Terminal rendering for wizard prompts, resource lists, email
//! previews, delivery reports, and JSON output.

pub mod console;

pub use console::ConsoleFormatter;
