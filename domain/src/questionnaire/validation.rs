//! Per-kind answer validation
//!
//! Validation runs inside the wizard reducer before an answer is stored.
//! Every failure is local and recoverable: the wizard stays on the current
//! question and surfaces the field-level error.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::answer::AnswerValue;
use super::spec::{ContactFieldKind, QuestionKind, QuestionSpec};

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Whether a string looks like an email address
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value.trim())
}

/// Field-level validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("an answer is required here")]
    Required,

    #[error("'{0}' does not look like an email address")]
    InvalidEmail(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not one of the listed options")]
    UnknownOption(String),

    #[error("select at least one option")]
    NoSelection,

    #[error("{label} is required")]
    MissingContactField { label: String },

    #[error("{label} '{value}' does not look like an email address")]
    InvalidContactEmail { label: String, value: String },

    #[error("this question expects a {expected} answer")]
    WrongShape { expected: &'static str },
}

/// Validate a submitted value against its question and return the canonical
/// string to store.
///
/// Text is stored trimmed; selections and contact fields are stored as JSON
/// text. The Select All marker never appears in a stored selection.
pub fn validate(spec: &QuestionSpec, value: &AnswerValue) -> Result<String, ValidationError> {
    match (spec.kind, value) {
        (QuestionKind::ShortText, AnswerValue::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() && spec.required {
                return Err(ValidationError::Required);
            }
            Ok(trimmed.to_string())
        }

        (QuestionKind::FreeText, AnswerValue::Text(raw)) => Ok(raw.trim().to_string()),

        (QuestionKind::Email, AnswerValue::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::Required);
            }
            if !is_valid_email(trimmed) {
                return Err(ValidationError::InvalidEmail(trimmed.to_string()));
            }
            Ok(trimmed.to_string())
        }

        (QuestionKind::Number, AnswerValue::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::Required);
            }
            if trimmed.parse::<f64>().is_err() {
                return Err(ValidationError::NotANumber(trimmed.to_string()));
            }
            Ok(trimmed.to_string())
        }

        (QuestionKind::SingleSelect, AnswerValue::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::Required);
            }
            if !spec.concrete_options().any(|o| o == trimmed) {
                return Err(ValidationError::UnknownOption(trimmed.to_string()));
            }
            Ok(trimmed.to_string())
        }

        (QuestionKind::MultiSelect, AnswerValue::Selections(choices)) => {
            if choices.is_empty() && spec.required {
                return Err(ValidationError::NoSelection);
            }
            for choice in choices {
                if !spec.concrete_options().any(|o| o == choice) {
                    return Err(ValidationError::UnknownOption(choice.clone()));
                }
            }
            Ok(serde_json::to_string(choices).unwrap_or_else(|_| "[]".to_string()))
        }

        (QuestionKind::ContactFields, AnswerValue::Contact(fields)) => {
            for field in &spec.contact_fields {
                let value = fields.get(&field.key).map(String::as_str).unwrap_or("");
                let value = value.trim();
                if value.is_empty() {
                    return Err(ValidationError::MissingContactField {
                        label: field.label.clone(),
                    });
                }
                if field.kind == ContactFieldKind::Email && !is_valid_email(value) {
                    return Err(ValidationError::InvalidContactEmail {
                        label: field.label.clone(),
                        value: value.to_string(),
                    });
                }
            }
            let trimmed: std::collections::BTreeMap<String, String> = fields
                .iter()
                .map(|(k, v)| (k.clone(), v.trim().to_string()))
                .collect();
            Ok(serde_json::to_string(&trimmed).unwrap_or_else(|_| "{}".to_string()))
        }

        (QuestionKind::MultiSelect, _) => Err(ValidationError::WrongShape {
            expected: "multi-select",
        }),
        (QuestionKind::ContactFields, _) => Err(ValidationError::WrongShape {
            expected: "contact-fields",
        }),
        (_, _) => Err(ValidationError::WrongShape { expected: "text" }),
    }
}
