//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Choice, ChoiceChanges, ChoiceId, NewChoice, NewQuestion, Question, QuestionChanges,
    QuestionId,
};
use crate::domain::ports::{ChoiceRepository, QuestionFilter, QuestionRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Poll Store
// ============================================================================

#[derive(Default)]
struct PollTables {
    questions: BTreeMap<QuestionId, Question>,
    choices: BTreeMap<ChoiceId, Choice>,
    next_question_id: i32,
    next_choice_id: i32,
}

impl PollTables {
    fn insert_choice(&mut self, question_id: QuestionId, choice: &NewChoice) -> Choice {
        self.next_choice_id += 1;
        let choice = Choice {
            id: ChoiceId(self.next_choice_id),
            question_id,
            choice_text: choice.choice_text.clone(),
            votes: choice.votes,
        };
        self.choices.insert(choice.id, choice.clone());
        choice
    }
}

/// Questions and choices in one store, so deletes can cascade.
///
/// Implements both repository ports; share it through `Arc` clones.
#[derive(Default, Clone)]
pub struct InMemoryPollStore {
    tables: Arc<RwLock<PollTables>>,
}

impl InMemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored questions
    pub fn question_count(&self) -> usize {
        self.tables.read().unwrap().questions.len()
    }

    /// Number of stored choices
    pub fn choice_count(&self) -> usize {
        self.tables.read().unwrap().choices.len()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryPollStore {
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.questions.get(id).cloned())
    }

    async fn find_published(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Question>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut published: Vec<Question> = tables
            .questions
            .values()
            .filter(|q| q.is_published(now))
            .cloned()
            .collect();
        published.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        published.truncate(limit as usize);
        Ok(published)
    }

    async fn list(&self, filter: &QuestionFilter) -> Result<Vec<Question>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut questions: Vec<Question> = tables
            .questions
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        Ok(questions)
    }

    async fn create_with_choices(
        &self,
        question: &NewQuestion,
        choices: &[NewChoice],
    ) -> Result<(Question, Vec<Choice>), DomainError> {
        question.validate_with_choices(choices)?;

        let mut tables = self.tables.write().unwrap();
        tables.next_question_id += 1;
        let saved = Question {
            id: QuestionId(tables.next_question_id),
            question_text: question.question_text.clone(),
            pub_date: question.pub_date,
        };
        tables.questions.insert(saved.id, saved.clone());

        let saved_choices = choices
            .iter()
            .map(|c| tables.insert_choice(saved.id, c))
            .collect();

        Ok((saved, saved_choices))
    }

    async fn update(
        &self,
        id: &QuestionId,
        changes: &QuestionChanges,
    ) -> Result<Question, DomainError> {
        changes.validate()?;

        let mut tables = self.tables.write().unwrap();
        let question = tables
            .questions
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Question {} not found", id)))?;
        if let Some(text) = &changes.question_text {
            question.question_text = text.clone();
        }
        if let Some(pub_date) = changes.pub_date {
            question.pub_date = pub_date;
        }
        Ok(question.clone())
    }

    async fn delete(&self, id: &QuestionId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().unwrap();
        if tables.questions.remove(id).is_none() {
            return Err(DomainError::NotFound(format!("Question {} not found", id)));
        }
        tables.choices.retain(|_, c| c.question_id != *id);
        Ok(())
    }
}

#[async_trait]
impl ChoiceRepository for InMemoryPollStore {
    async fn find_by_id(&self, id: &ChoiceId) -> Result<Option<Choice>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.choices.get(id).cloned())
    }

    async fn find_by_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Choice>, DomainError> {
        ChoiceRepository::list(self, Some(question_id)).await
    }

    async fn list(&self, question_id: Option<&QuestionId>) -> Result<Vec<Choice>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .choices
            .values()
            .filter(|c| question_id.map_or(true, |q| c.question_id == *q))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        question_id: &QuestionId,
        choice: &NewChoice,
    ) -> Result<Choice, DomainError> {
        choice.validate()?;

        let mut tables = self.tables.write().unwrap();
        if !tables.questions.contains_key(question_id) {
            return Err(DomainError::NotFound(format!(
                "Question {} not found",
                question_id
            )));
        }
        Ok(tables.insert_choice(*question_id, choice))
    }

    async fn update(&self, id: &ChoiceId, changes: &ChoiceChanges) -> Result<Choice, DomainError> {
        changes.validate()?;

        let mut tables = self.tables.write().unwrap();
        let choice = tables
            .choices
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Choice {} not found", id)))?;
        if let Some(text) = &changes.choice_text {
            choice.choice_text = text.clone();
        }
        if let Some(votes) = changes.votes {
            choice.votes = votes;
        }
        Ok(choice.clone())
    }

    async fn increment_votes(&self, id: &ChoiceId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().unwrap();
        let choice = tables
            .choices
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Choice {} not found", id)))?;
        choice.votes += 1;
        Ok(())
    }

    async fn delete(&self, id: &ChoiceId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().unwrap();
        tables
            .choices
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("Choice {} not found", id)))
    }
}
