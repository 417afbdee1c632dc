//! Poll page handlers
//!
//! Public HTML pages: index, detail, results, and the vote action.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use serde::Deserialize;

use crate::app::VoteOutcome;
use crate::domain::entities::{ChoiceId, QuestionId};
use crate::error::AppError;
use crate::AppState;

/// Submitted vote form
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    /// ID of the selected choice; absent when nothing was picked
    pub choice: Option<String>,
}

/// GET /polls/
///
/// Latest published questions, newest first.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let latest = state.poll_service.latest_questions(Utc::now()).await?;
    Ok(Html(state.pages.render_index(&latest)?))
}

/// GET /polls/:question_id/
pub async fn detail(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let Path(question_id) = path?;
    let page = state
        .poll_service
        .published_question(QuestionId(question_id), Utc::now())
        .await?;
    Ok(Html(state.pages.render_detail(&page, false)?))
}

/// GET /polls/:question_id/results/
pub async fn results(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let Path(question_id) = path?;
    let page = state
        .poll_service
        .published_question(QuestionId(question_id), Utc::now())
        .await?;
    Ok(Html(state.pages.render_results(&page)?))
}

/// POST /polls/:question_id/vote/
///
/// Counts the vote and redirects to the results, so refreshing the results
/// page never submits the vote twice. Without a valid choice the detail page
/// is shown again (200) with an error message.
pub async fn vote(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    form: Option<Form<VoteForm>>,
) -> Result<Response, AppError> {
    let Path(question_id) = path?;
    let choice = form
        .and_then(|Form(form)| form.choice)
        .and_then(|raw| raw.parse::<ChoiceId>().ok());

    let outcome = state
        .poll_service
        .vote(QuestionId(question_id), choice, Utc::now())
        .await?;

    match outcome {
        VoteOutcome::Recorded { question_id, .. } => {
            Ok(Redirect::to(&format!("/polls/{}/results/", question_id)).into_response())
        }
        VoteOutcome::NoChoice(page) => {
            Ok(Html(state.pages.render_detail(&page, true)?).into_response())
        }
    }
}
