//! Poll service
//!
//! Public side of the polls: the index of latest questions, a question's
//! detail and results pages, and voting. Questions whose `pub_date` is still
//! in the future do not exist as far as this service is concerned.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Choice, ChoiceId, Question, QuestionId};
use crate::domain::ports::{ChoiceRepository, QuestionRepository};
use crate::error::{AppError, DomainError};

/// How many questions the index shows unless configured otherwise
pub const DEFAULT_INDEX_PAGE_SIZE: u64 = 5;

/// A question together with its choices, in creation order
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}

/// What happened to a submitted vote
#[derive(Debug, Clone)]
pub enum VoteOutcome {
    /// The vote was counted
    Recorded { question_id: QuestionId, choice_id: ChoiceId },
    /// Nothing (or nothing valid) was selected; show the form again
    NoChoice(QuestionWithChoices),
}

/// Service for the public poll pages
pub struct PollService<QR, CR>
where
    QR: QuestionRepository,
    CR: ChoiceRepository,
{
    questions: Arc<QR>,
    choices: Arc<CR>,
    index_page_size: u64,
}

impl<QR, CR> PollService<QR, CR>
where
    QR: QuestionRepository,
    CR: ChoiceRepository,
{
    pub fn new(questions: Arc<QR>, choices: Arc<CR>, index_page_size: u64) -> Self {
        Self {
            questions,
            choices,
            index_page_size,
        }
    }

    /// Latest published questions, newest first
    pub async fn latest_questions(&self, now: DateTime<Utc>) -> Result<Vec<Question>, AppError> {
        Ok(self
            .questions
            .find_published(now, self.index_page_size)
            .await?)
    }

    /// A published question and its choices.
    ///
    /// Missing and future questions are both `NotFound`.
    pub async fn published_question(
        &self,
        id: QuestionId,
        now: DateTime<Utc>,
    ) -> Result<QuestionWithChoices, AppError> {
        let question = self
            .questions
            .find_by_id(&id)
            .await?
            .filter(|q| q.is_published(now))
            .ok_or_else(|| DomainError::NotFound(format!("Question {} not found", id)))?;

        let choices = self.choices.find_by_question(&question.id).await?;
        Ok(QuestionWithChoices { question, choices })
    }

    /// Count one vote for `choice` on question `id`.
    ///
    /// A missing selection, or one that does not belong to the question, is
    /// not an error: the caller gets the question back to ask again.
    pub async fn vote(
        &self,
        id: QuestionId,
        choice: Option<ChoiceId>,
        now: DateTime<Utc>,
    ) -> Result<VoteOutcome, AppError> {
        let page = self.published_question(id, now).await?;

        let selected = choice.and_then(|choice_id| {
            page.choices
                .iter()
                .find(|c| c.id == choice_id)
                .map(|c| c.id)
        });

        let Some(choice_id) = selected else {
            tracing::debug!(question_id = %id, "Vote submitted without a valid choice");
            return Ok(VoteOutcome::NoChoice(page));
        };

        self.choices.increment_votes(&choice_id).await?;
        tracing::info!(question_id = %id, choice_id = %choice_id, "Vote recorded");

        Ok(VoteOutcome::Recorded {
            question_id: id,
            choice_id,
        })
    }
}
