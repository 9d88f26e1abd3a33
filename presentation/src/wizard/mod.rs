//! Interactive questionnaire wizard
//!
//! Provides the readline-based wizard that walks a caregiver from intake
//! questions to sent outreach emails.

mod input;
mod repl;

pub use repl::WizardRepl;
