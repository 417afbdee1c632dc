//! Choice domain entity
//!
//! One selectable answer of a question, carrying its vote counter.

use serde::{Deserialize, Serialize};

use super::question::{validate_text, QuestionId};
use crate::error::DomainError;

/// Unique identifier for a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChoiceId(pub i32);

impl From<i32> for ChoiceId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ChoiceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ChoiceId)
    }
}

/// A persisted choice, owned by exactly one question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub question_id: QuestionId,
    pub choice_text: String,
    pub votes: i32,
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.choice_text)
    }
}

/// An unsaved choice. Linked to its question when the question is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChoice {
    pub choice_text: String,
    pub votes: i32,
}

impl NewChoice {
    pub fn new(choice_text: impl Into<String>) -> Self {
        Self {
            choice_text: choice_text.into(),
            votes: 0,
        }
    }

    pub fn with_votes(mut self, votes: i32) -> Self {
        self.votes = votes;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_text("choice_text", &self.choice_text)?;
        validate_votes(self.votes)
    }
}

/// Partial update of a choice (admin change form)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceChanges {
    pub choice_text: Option<String>,
    pub votes: Option<i32>,
}

impl ChoiceChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(text) = &self.choice_text {
            validate_text("choice_text", text)?;
        }
        if let Some(votes) = self.votes {
            validate_votes(votes)?;
        }
        Ok(())
    }
}

fn validate_votes(votes: i32) -> Result<(), DomainError> {
    if votes < 0 {
        return Err(DomainError::Validation(format!(
            "votes cannot be negative (got {})",
            votes
        )));
    }
    Ok(())
}
