//! Admin service
//!
//! Create, edit and delete questions and choices from the admin console.
//! Question creation goes through the inline formset rules of `QuestionAdmin`,
//! so a question is only ever saved together with at least two choices.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::admin::{ChangeListQuery, QuestionAddForm, QuestionAdmin};
use crate::app::QuestionWithChoices;
use crate::domain::entities::{
    Choice, ChoiceChanges, ChoiceId, NewChoice, Question, QuestionChanges, QuestionId,
};
use crate::domain::ports::{ChoiceRepository, QuestionRepository};
use crate::error::{AppError, DomainError};

/// One row of the question change list
#[derive(Debug, Clone, Serialize)]
pub struct QuestionRow {
    #[serde(flatten)]
    pub question: Question,
    pub was_published_recently: bool,
}

/// Service backing the admin console
pub struct AdminService<QR, CR>
where
    QR: QuestionRepository,
    CR: ChoiceRepository,
{
    questions: Arc<QR>,
    choices: Arc<CR>,
    options: QuestionAdmin,
}

impl<QR, CR> AdminService<QR, CR>
where
    QR: QuestionRepository,
    CR: ChoiceRepository,
{
    pub fn new(questions: Arc<QR>, choices: Arc<CR>) -> Self {
        Self {
            questions,
            choices,
            options: QuestionAdmin::new(),
        }
    }

    pub fn options(&self) -> &QuestionAdmin {
        &self.options
    }

    /// Change list with search and date filter applied
    pub async fn list_questions(
        &self,
        query: &ChangeListQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<QuestionRow>, AppError> {
        let filter = self.options.change_list_filter(query, now);
        let questions = self.questions.list(&filter).await?;

        Ok(questions
            .into_iter()
            .map(|question| QuestionRow {
                was_published_recently: question.was_published_recently(now),
                question,
            })
            .collect())
    }

    /// Any question with its choices, published or not
    pub async fn get_question(&self, id: QuestionId) -> Result<QuestionWithChoices, AppError> {
        let question = self
            .questions
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Question {} not found", id)))?;
        let choices = self.choices.find_by_question(&id).await?;
        Ok(QuestionWithChoices { question, choices })
    }

    /// Save a question from the add form together with its inline choices
    pub async fn create_question(
        &self,
        form: &QuestionAddForm,
    ) -> Result<QuestionWithChoices, AppError> {
        let (new_question, new_choices) = self.options.clean(form)?;

        let (question, choices) = self
            .questions
            .create_with_choices(&new_question, &new_choices)
            .await?;

        tracing::info!(
            question_id = %question.id,
            choices = choices.len(),
            "Question created"
        );
        Ok(QuestionWithChoices { question, choices })
    }

    pub async fn update_question(
        &self,
        id: QuestionId,
        changes: &QuestionChanges,
    ) -> Result<Question, AppError> {
        let question = self.questions.update(&id, changes).await?;
        tracing::info!(question_id = %id, "Question updated");
        Ok(question)
    }

    /// Delete a question and, through the store, all of its choices
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), AppError> {
        self.questions.delete(&id).await?;
        tracing::info!(question_id = %id, "Question deleted");
        Ok(())
    }

    pub async fn list_choices(
        &self,
        question_id: Option<QuestionId>,
    ) -> Result<Vec<Choice>, AppError> {
        Ok(self.choices.list(question_id.as_ref()).await?)
    }

    pub async fn get_choice(&self, id: ChoiceId) -> Result<Choice, AppError> {
        self.choices
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Choice {} not found", id)).into())
    }

    /// Add a choice to an existing question
    pub async fn add_choice(
        &self,
        question_id: QuestionId,
        choice: &NewChoice,
    ) -> Result<Choice, AppError> {
        let choice = self.choices.create(&question_id, choice).await?;
        tracing::info!(question_id = %question_id, choice_id = %choice.id, "Choice added");
        Ok(choice)
    }

    pub async fn update_choice(
        &self,
        id: ChoiceId,
        changes: &ChoiceChanges,
    ) -> Result<Choice, AppError> {
        let choice = self.choices.update(&id, changes).await?;
        tracing::info!(choice_id = %id, "Choice updated");
        Ok(choice)
    }

    pub async fn delete_choice(&self, id: ChoiceId) -> Result<(), AppError> {
        self.choices.delete(&id).await?;
        tracing::info!(choice_id = %id, "Choice deleted");
        Ok(())
    }
}
