//! Inline editors and formset validation
//!
//! An inline editor edits child rows (choices) inside the parent's form. The
//! editor decides the formset configuration; policies such as
//! [`MinChoicesPolicy`] wrap an editor and adjust that configuration without
//! the editor knowing about them.

use serde::{Deserialize, Serialize};

use crate::domain::entities::NewChoice;
use crate::error::{DomainError, FormErrors};

/// How many inline forms are shown and how many must be filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormsetConfig {
    /// Blank forms offered in addition to the filled ones
    pub extra: usize,
    pub min_num: usize,
    pub max_num: usize,
    pub validate_min: bool,
    pub validate_max: bool,
}

impl Default for FormsetConfig {
    fn default() -> Self {
        Self {
            extra: 3,
            min_num: 0,
            max_num: 1000,
            validate_min: false,
            validate_max: false,
        }
    }
}

/// One submitted inline choice row
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineChoiceForm {
    #[serde(default)]
    pub choice_text: String,
    #[serde(default)]
    pub votes: Option<i32>,
    /// Row was ticked for deletion; it is ignored
    #[serde(default, rename = "DELETE")]
    pub delete: bool,
}

impl InlineChoiceForm {
    pub fn new(choice_text: impl Into<String>) -> Self {
        Self {
            choice_text: choice_text.into(),
            ..Default::default()
        }
    }

    /// An untouched extra row
    fn is_blank(&self) -> bool {
        self.choice_text.trim().is_empty() && self.votes.is_none()
    }
}

impl FormsetConfig {
    /// Validate submitted rows, returning the choices to save.
    ///
    /// Blank rows and rows marked for deletion are skipped and do not count
    /// toward `min_num`.
    pub fn validate(&self, forms: &[InlineChoiceForm]) -> Result<Vec<NewChoice>, FormErrors> {
        let mut errors = FormErrors::new();
        let mut choices = Vec::new();

        for (index, form) in forms.iter().enumerate() {
            if form.delete || form.is_blank() {
                continue;
            }
            let choice = NewChoice::new(form.choice_text.trim()).with_votes(form.votes.unwrap_or(0));
            match choice.validate() {
                Ok(()) => choices.push(choice),
                Err(DomainError::Validation(msg)) => {
                    errors.add_field(format!("choices[{}]", index), msg)
                }
                Err(e) => errors.add_field(format!("choices[{}]", index), e.to_string()),
            }
        }

        // Invalid rows still count as submitted, as they would in the form
        let submitted = choices.len() + errors.fields.len();
        if self.validate_min && submitted < self.min_num {
            errors.add_non_field(format!("Please submit at least {} choices.", self.min_num));
        }
        if self.validate_max && submitted > self.max_num {
            errors.add_non_field(format!("Please submit at most {} choices.", self.max_num));
        }

        errors.into_result().map(|()| choices)
    }
}

/// Something that edits child rows inline and knows its formset settings
pub trait InlineEditor: Send + Sync {
    /// Formset configuration derived from the caller's `base`
    fn get_formset(&self, base: FormsetConfig) -> FormsetConfig;
}

/// Inline editor for the choices of a question
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceInline;

impl InlineEditor for ChoiceInline {
    fn get_formset(&self, base: FormsetConfig) -> FormsetConfig {
        FormsetConfig { extra: 1, ..base }
    }
}

/// Requires at least `minimum` filled rows in whatever formset the wrapped
/// editor produces
#[derive(Debug, Clone, Copy)]
pub struct MinChoicesPolicy<E> {
    inner: E,
    minimum: usize,
}

impl<E: InlineEditor> MinChoicesPolicy<E> {
    pub fn new(inner: E, minimum: usize) -> Self {
        Self { inner, minimum }
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }
}

impl<E: InlineEditor> InlineEditor for MinChoicesPolicy<E> {
    fn get_formset(&self, base: FormsetConfig) -> FormsetConfig {
        FormsetConfig {
            min_num: self.minimum,
            validate_min: true,
            ..self.inner.get_formset(base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(texts: &[&str]) -> Vec<InlineChoiceForm> {
        texts.iter().map(|t| InlineChoiceForm::new(*t)).collect()
    }

    #[test]
    fn choice_inline_offers_one_extra_row() {
        let config = ChoiceInline.get_formset(FormsetConfig::default());
        assert_eq!(config.extra, 1);
        assert_eq!(config.min_num, 0);
        assert!(!config.validate_min);
    }

    #[test]
    fn policy_injects_minimum_into_wrapped_editor() {
        let policy = MinChoicesPolicy::new(ChoiceInline, 2);
        let config = policy.get_formset(FormsetConfig::default());
        assert_eq!(config.min_num, policy.minimum());
        assert!(config.validate_min);
        // The wrapped editor's own settings survive
        assert_eq!(config.extra, 1);
    }

    #[test]
    fn policy_overrides_whatever_base_the_caller_asks_for() {
        let policy = MinChoicesPolicy::new(ChoiceInline, 3);
        let base = FormsetConfig {
            min_num: 10,
            max_num: 5,
            validate_max: true,
            ..Default::default()
        };
        let config = policy.get_formset(base);
        assert_eq!(config.min_num, 3);
        assert_eq!(config.max_num, 5);
        assert!(config.validate_max);
    }

    #[test]
    fn unvalidated_formset_accepts_anything() {
        let config = ChoiceInline.get_formset(FormsetConfig::default());
        assert!(config.validate(&[]).unwrap().is_empty());
    }

    #[test]
    fn too_few_choices_is_a_form_error() {
        let config = MinChoicesPolicy::new(ChoiceInline, 2).get_formset(FormsetConfig::default());
        let errors = config.validate(&forms(&["Only one"])).unwrap_err();
        assert_eq!(
            errors.non_field_errors,
            vec!["Please submit at least 2 choices.".to_string()]
        );
    }

    #[test]
    fn blank_and_deleted_rows_do_not_count() {
        let config = MinChoicesPolicy::new(ChoiceInline, 2).get_formset(FormsetConfig::default());
        let mut rows = forms(&["Kept", "   ", "Deleted"]);
        rows[2].delete = true;
        assert!(config.validate(&rows).is_err());

        rows.push(InlineChoiceForm::new("Second"));
        let choices = config.validate(&rows).unwrap();
        let texts: Vec<_> = choices.iter().map(|c| c.choice_text.as_str()).collect();
        assert_eq!(texts, vec!["Kept", "Second"]);
    }

    #[test]
    fn invalid_rows_report_field_errors() {
        let config = MinChoicesPolicy::new(ChoiceInline, 2).get_formset(FormsetConfig::default());
        let long = "x".repeat(201);
        let errors = config.validate(&forms(&["Fine", &long])).unwrap_err();
        assert!(errors.fields.contains_key("choices[1]"));
        // Two rows were submitted, so the minimum itself is satisfied
        assert!(errors.non_field_errors.is_empty());
    }

    #[test]
    fn votes_are_carried_over() {
        let config = MinChoicesPolicy::new(ChoiceInline, 2).get_formset(FormsetConfig::default());
        let mut rows = forms(&["A", "B"]);
        rows[1].votes = Some(4);
        let choices = config.validate(&rows).unwrap();
        assert_eq!(choices[0].votes, 0);
        assert_eq!(choices[1].votes, 4);
    }

    #[test]
    fn max_is_enforced_when_requested() {
        let config = FormsetConfig {
            max_num: 1,
            validate_max: true,
            ..Default::default()
        };
        let errors = config.validate(&forms(&["A", "B"])).unwrap_err();
        assert_eq!(
            errors.non_field_errors,
            vec!["Please submit at most 1 choices.".to_string()]
        );
    }
}
