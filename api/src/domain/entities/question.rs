//! Question domain entity
//!
//! A poll prompt with a publication timestamp. A question only becomes
//! visible to voters once its `pub_date` has passed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::choice::NewChoice;
use crate::error::DomainError;

/// Maximum length (in characters) of question and choice texts
pub const MAX_TEXT_LEN: usize = 200;

/// Unique identifier for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub i32);

impl From<i32> for QuestionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted poll question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub question_text: String,
    /// Date published
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// True iff the question was published within the day before `now`
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        published_recently(self.pub_date, now)
    }

    /// Whether voters may see this question at `now`
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.question_text)
    }
}

/// Publication window check: `now - 1 day <= pub_date <= now`, both ends inclusive.
pub fn published_recently(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - Duration::days(1) <= pub_date && pub_date <= now
}

/// Validate a bounded, non-blank text field
pub fn validate_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} cannot be blank", field)));
    }
    let len = value.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters (got {})",
            field, MAX_TEXT_LEN, len
        )));
    }
    Ok(())
}

/// Data needed to create a new question
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl NewQuestion {
    pub fn new(question_text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            question_text: question_text.into(),
            pub_date,
        }
    }

    /// Validate the question together with the choices it will be saved with.
    ///
    /// A question is never persisted without choices.
    pub fn validate_with_choices(&self, choices: &[NewChoice]) -> Result<(), DomainError> {
        if choices.is_empty() {
            return Err(DomainError::Validation("Should have choices".to_string()));
        }
        validate_text("question_text", &self.question_text)?;
        for choice in choices {
            choice.validate()?;
        }
        Ok(())
    }
}

/// Partial update of a question (admin change form)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionChanges {
    pub question_text: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
}

impl QuestionChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(text) = &self.question_text {
            validate_text("question_text", text)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.question_text.is_none() && self.pub_date.is_none()
    }
}
