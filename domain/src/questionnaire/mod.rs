//! Intake questionnaire domain
//!
//! - [`spec::Questionnaire`] — the static, ordered list of question
//!   definitions that drives the wizard
//! - [`answer::AnswerSet`] — the caregiver's accumulated answers
//! - [`validation`] — per-kind answer validation
//! - [`wizard::WizardState`] — the session aggregate and its reducer

pub mod answer;
pub mod spec;
pub mod validation;
pub mod wizard;

// Re-export main types
pub use answer::{Answer, AnswerSet, AnswerValue, SKIPPED};
pub use spec::{ContactField, ContactFieldKind, QuestionKind, QuestionSpec, Questionnaire, SELECT_ALL};
pub use validation::ValidationError;
pub use wizard::{Stage, WizardAction, WizardError, WizardState};
