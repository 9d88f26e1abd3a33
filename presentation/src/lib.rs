//! Presentation layer for AskEdith
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive questionnaire wizard.

pub mod cli;
pub mod output;
pub mod progress;
pub mod wizard;

// Re-export commonly used types
pub use cli::commands::{Cli, Commands, ListFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use wizard::WizardRepl;
