//! Question definitions
//!
//! The questionnaire is static and defined at build time: an ordered list of
//! [`QuestionSpec`]s with contiguous 1-based positions. The wizard walks this
//! list; nothing mutates it at runtime.

use serde::{Deserialize, Serialize};

/// Marker option on a multi-select that expands to every other option.
///
/// The stored answer never contains this marker itself; see
/// [`QuestionSpec::toggle_option`].
pub const SELECT_ALL: &str = "Select All";

/// Input kind of a question, driving both rendering and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Single line of text, non-empty when required
    ShortText,
    /// Single line that must look like an email address
    Email,
    /// Single line that must parse numerically
    Number,
    /// Exactly one of the declared options
    SingleSelect,
    /// One or more of the declared options
    MultiSelect,
    /// Multi-line notes; may be skipped when not required
    FreeText,
    /// A fixed group of contact sub-fields submitted together
    ContactFields,
}

/// Kind of a contact sub-field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactFieldKind {
    Text,
    Email,
}

/// One sub-field of a contact-fields question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactField {
    /// Stable key inside the stored contact object
    pub key: String,
    /// Label shown when prompting and in error messages
    pub label: String,
    pub kind: ContactFieldKind,
}

impl ContactField {
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ContactFieldKind::Text,
        }
    }

    pub fn email(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ContactFieldKind::Email,
        }
    }
}

/// A single question definition (Value Object)
///
/// Positions are 1-based and contiguous across the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    /// 1-based ordinal within the questionnaire
    pub position: usize,
    /// Stable key the answer is stored under
    pub key: String,
    /// Prompt shown to the caregiver
    pub prompt: String,
    pub kind: QuestionKind,
    /// Declared options for select kinds, empty otherwise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub required: bool,
    /// Sub-fields for [`QuestionKind::ContactFields`], empty otherwise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_fields: Vec<ContactField>,
}

impl QuestionSpec {
    pub fn new(
        position: usize,
        key: impl Into<String>,
        prompt: impl Into<String>,
        kind: QuestionKind,
    ) -> Self {
        Self {
            position,
            key: key.into(),
            prompt: prompt.into(),
            kind,
            options: Vec::new(),
            required: true,
            contact_fields: Vec::new(),
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_contact_fields(mut self, fields: Vec<ContactField>) -> Self {
        self.contact_fields = fields;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Whether this multi-select declares the Select All marker
    pub fn has_select_all(&self) -> bool {
        self.options.iter().any(|o| o == SELECT_ALL)
    }

    /// All declared options except the Select All marker
    pub fn concrete_options(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(|o| *o != SELECT_ALL)
    }

    /// Apply one multi-select toggle to the current selection.
    ///
    /// Toggling the Select All marker selects every concrete option, or
    /// clears the selection when everything was already selected.
    /// Deselecting any individual option just removes it, which implicitly
    /// leaves the set no longer "all selected". The returned set never
    /// contains the marker itself.
    pub fn toggle_option(&self, selected: &[String], choice: &str) -> Vec<String> {
        if choice == SELECT_ALL {
            let all: Vec<String> = self.concrete_options().map(String::from).collect();
            if selected.len() == all.len() && all.iter().all(|o| selected.contains(o)) {
                return Vec::new();
            }
            return all;
        }

        let mut next: Vec<String> = selected.iter().filter(|o| *o != choice).cloned().collect();
        if next.len() == selected.len() {
            next.push(choice.to_string());
        }
        next
    }
}

/// The static, ordered list of questions the wizard steps through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    questions: Vec<QuestionSpec>,
}

impl Questionnaire {
    /// Build a questionnaire from an ordered list of specs.
    ///
    /// # Panics
    /// Panics if positions are not contiguous starting at 1.
    pub fn new(questions: Vec<QuestionSpec>) -> Self {
        let q = Self { questions };
        assert!(
            q.has_contiguous_positions(),
            "question positions must be contiguous starting at 1"
        );
        q
    }

    /// The built-in caregiver intake questionnaire
    pub fn intake() -> Self {
        Self::new(vec![
            QuestionSpec::new(
                1,
                "care_recipient",
                "Who are you seeking care for?",
                QuestionKind::SingleSelect,
            )
            .with_options([
                "Mom",
                "Dad",
                "Both parents",
                "Spouse",
                "Myself",
                "Another family member",
            ]),
            QuestionSpec::new(
                2,
                "care_recipient_age",
                "How old is the person needing care?",
                QuestionKind::Number,
            ),
            QuestionSpec::new(
                3,
                "living_situation",
                "What is their current living situation?",
                QuestionKind::SingleSelect,
            )
            .with_options([
                "Lives alone",
                "Lives with spouse",
                "Lives with family",
                "Assisted living community",
                "Skilled nursing facility",
            ]),
            QuestionSpec::new(
                4,
                "care_needs",
                "What kind of help do they need?",
                QuestionKind::MultiSelect,
            )
            .with_options([
                SELECT_ALL,
                "Personal care",
                "Meal preparation",
                "Medication management",
                "Transportation",
                "Companionship",
                "Housekeeping",
                "Memory care",
            ]),
            QuestionSpec::new(
                5,
                "budget",
                "What is your monthly budget for care?",
                QuestionKind::SingleSelect,
            )
            .with_options([
                "Under $1,000",
                "$1,000 - $2,500",
                "$2,500 - $5,000",
                "Over $5,000",
                "Not sure yet",
            ]),
            QuestionSpec::new(
                6,
                "timeline",
                "How soon do you need help in place?",
                QuestionKind::SingleSelect,
            )
            .with_options([
                "Immediately",
                "Within a month",
                "1-3 months",
                "3-6 months",
                "Just researching",
            ]),
            QuestionSpec::new(
                7,
                "concerns",
                "Anything else you'd like providers to know?",
                QuestionKind::FreeText,
            )
            .optional(),
            QuestionSpec::new(
                8,
                "contact",
                "How should providers reach you?",
                QuestionKind::ContactFields,
            )
            .with_contact_fields(vec![
                ContactField::text("last_name", "Last name"),
                ContactField::email("email", "Email address"),
                ContactField::text("phone", "Phone number"),
                ContactField::text("postal_code", "ZIP code"),
            ]),
        ])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by its 1-based position
    pub fn get(&self, position: usize) -> Option<&QuestionSpec> {
        position
            .checked_sub(1)
            .and_then(|i| self.questions.get(i))
    }

    pub fn by_key(&self, key: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|q| q.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.questions.iter()
    }

    fn has_contiguous_positions(&self) -> bool {
        self.questions
            .iter()
            .enumerate()
            .all(|(i, q)| q.position == i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_positions_are_contiguous() {
        let q = Questionnaire::intake();
        for (i, spec) in q.iter().enumerate() {
            assert_eq!(spec.position, i + 1);
        }
    }

    #[test]
    fn test_intake_shape() {
        let q = Questionnaire::intake();
        assert_eq!(q.len(), 8);
        assert_eq!(q.get(1).unwrap().key, "care_recipient");
        assert_eq!(q.get(8).unwrap().kind, QuestionKind::ContactFields);
        assert!(q.get(0).is_none());
        assert!(q.get(9).is_none());
    }

    #[test]
    fn test_by_key() {
        let q = Questionnaire::intake();
        assert_eq!(q.by_key("budget").unwrap().position, 5);
        assert!(q.by_key("nope").is_none());
    }

    #[test]
    #[should_panic]
    fn test_gap_in_positions_panics() {
        Questionnaire::new(vec![
            QuestionSpec::new(1, "a", "A?", QuestionKind::ShortText),
            QuestionSpec::new(3, "b", "B?", QuestionKind::ShortText),
        ]);
    }

    #[test]
    fn test_select_all_expands_to_concrete_options() {
        let q = Questionnaire::intake();
        let needs = q.by_key("care_needs").unwrap();

        let selected = needs.toggle_option(&[], SELECT_ALL);
        assert_eq!(selected.len(), needs.options.len() - 1);
        assert!(!selected.iter().any(|o| o == SELECT_ALL));
    }

    #[test]
    fn test_deselect_one_after_select_all() {
        let q = Questionnaire::intake();
        let needs = q.by_key("care_needs").unwrap();

        let all = needs.toggle_option(&[], SELECT_ALL);
        let fewer = needs.toggle_option(&all, "Transportation");

        assert_eq!(fewer.len(), all.len() - 1);
        assert!(!fewer.contains(&"Transportation".to_string()));
        assert!(!fewer.iter().any(|o| o == SELECT_ALL));
    }

    #[test]
    fn test_select_all_twice_clears() {
        let q = Questionnaire::intake();
        let needs = q.by_key("care_needs").unwrap();

        let all = needs.toggle_option(&[], SELECT_ALL);
        let none = needs.toggle_option(&all, SELECT_ALL);
        assert!(none.is_empty());
    }

    #[test]
    fn test_toggle_accumulates_individual_choices() {
        let q = Questionnaire::intake();
        let needs = q.by_key("care_needs").unwrap();

        let one = needs.toggle_option(&[], "Companionship");
        let two = needs.toggle_option(&one, "Housekeeping");
        assert_eq!(two, vec!["Companionship".to_string(), "Housekeeping".to_string()]);

        let back = needs.toggle_option(&two, "Companionship");
        assert_eq!(back, vec!["Housekeeping".to_string()]);
    }
}
