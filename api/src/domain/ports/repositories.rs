//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Choice, ChoiceChanges, ChoiceId, NewChoice, NewQuestion, Question, QuestionChanges,
    QuestionId,
};
use crate::error::DomainError;

/// Criteria for the admin change list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionFilter {
    /// Case-insensitive substring of `question_text`
    pub search: Option<String>,
    /// Inclusive lower bound on `pub_date`
    pub published_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `pub_date`
    pub published_until: Option<DateTime<Utc>>,
}

impl QuestionFilter {
    /// In-process evaluation of the filter, shared by non-SQL implementations
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(term) = &self.search {
            if !question
                .question_text
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }
        if let Some(from) = self.published_from {
            if question.pub_date < from {
                return false;
            }
        }
        if let Some(until) = self.published_until {
            if question.pub_date >= until {
                return false;
            }
        }
        true
    }
}

/// Repository for Question entities
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find a question by ID, regardless of publication date
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError>;

    /// Questions published at or before `now`, most recent first
    async fn find_published(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Question>, DomainError>;

    /// Questions matching an admin filter, most recent first
    async fn list(&self, filter: &QuestionFilter) -> Result<Vec<Question>, DomainError>;

    /// Persist a question together with its choices.
    ///
    /// Fails with `DomainError::Validation` and persists nothing when
    /// `choices` is empty. Either the question and every choice are stored,
    /// or none of them are.
    async fn create_with_choices(
        &self,
        question: &NewQuestion,
        choices: &[NewChoice],
    ) -> Result<(Question, Vec<Choice>), DomainError>;

    /// Apply a partial update
    async fn update(
        &self,
        id: &QuestionId,
        changes: &QuestionChanges,
    ) -> Result<Question, DomainError>;

    /// Delete a question; its choices go with it
    async fn delete(&self, id: &QuestionId) -> Result<(), DomainError>;
}

/// Repository for Choice entities
#[async_trait]
pub trait ChoiceRepository: Send + Sync {
    /// Find a choice by ID
    async fn find_by_id(&self, id: &ChoiceId) -> Result<Option<Choice>, DomainError>;

    /// Choices of a question, in creation order
    async fn find_by_question(&self, question_id: &QuestionId)
        -> Result<Vec<Choice>, DomainError>;

    /// All choices, optionally restricted to one question
    async fn list(&self, question_id: Option<&QuestionId>) -> Result<Vec<Choice>, DomainError>;

    /// Add a choice to an existing question
    async fn create(
        &self,
        question_id: &QuestionId,
        choice: &NewChoice,
    ) -> Result<Choice, DomainError>;

    /// Apply a partial update
    async fn update(&self, id: &ChoiceId, changes: &ChoiceChanges)
        -> Result<Choice, DomainError>;

    /// Add exactly one vote, atomically in the store
    async fn increment_votes(&self, id: &ChoiceId) -> Result<(), DomainError>;

    /// Delete a single choice
    async fn delete(&self, id: &ChoiceId) -> Result<(), DomainError>;
}
