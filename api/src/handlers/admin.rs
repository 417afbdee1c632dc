//! Admin console handlers
//!
//! JSON endpoints for managing questions and choices. All routes sit behind
//! `admin_auth_middleware`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::admin::{ChangeListQuery, FormsetConfig, QuestionAddForm, QuestionAdmin};
use crate::app::{QuestionRow, QuestionWithChoices};
use crate::domain::entities::{
    Choice, ChoiceChanges, ChoiceId, NewChoice, Question, QuestionChanges, QuestionId,
};
use crate::error::AppError;
use crate::AppState;

/// Description of a registered admin model
#[derive(Serialize)]
pub struct ModelAdminInfo {
    pub model: &'static str,
    pub fields: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_display: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_filter: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_fields: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<InlineInfo>,
}

/// Inline editor attached to a model admin
#[derive(Serialize)]
pub struct InlineInfo {
    pub model: &'static str,
    pub formset: FormsetConfig,
}

/// GET /admin/polls/
///
/// Registered models and their admin options.
pub async fn admin_index(State(state): State<AppState>) -> Json<Vec<ModelAdminInfo>> {
    let options = state.admin_service.options();
    Json(vec![
        ModelAdminInfo {
            model: "question",
            fields: QuestionAdmin::FIELDS.to_vec(),
            list_display: QuestionAdmin::LIST_DISPLAY.to_vec(),
            list_filter: QuestionAdmin::LIST_FILTER.to_vec(),
            search_fields: QuestionAdmin::SEARCH_FIELDS.to_vec(),
            inline: Some(InlineInfo {
                model: "choice",
                formset: options.choice_formset(),
            }),
        },
        ModelAdminInfo {
            model: "choice",
            fields: vec!["question", "choice_text", "votes"],
            list_display: vec![],
            list_filter: vec![],
            search_fields: vec![],
            inline: None,
        },
    ])
}

/// GET /admin/polls/questions?q=&pub_date=
pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<ChangeListQuery>, QueryRejection>,
) -> Result<Json<Vec<QuestionRow>>, AppError> {
    let Query(query) = query?;
    let rows = state
        .admin_service
        .list_questions(&query, Utc::now())
        .await?;
    Ok(Json(rows))
}

/// POST /admin/polls/questions
///
/// Question fields plus the inline `choices` formset.
pub async fn create_question(
    State(state): State<AppState>,
    payload: Result<Json<QuestionAddForm>, JsonRejection>,
) -> Result<(StatusCode, Json<QuestionWithChoices>), AppError> {
    let Json(form) = payload?;
    let created = state.admin_service.create_question(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /admin/polls/questions/:id
pub async fn get_question(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<QuestionWithChoices>, AppError> {
    let Path(id) = path?;
    Ok(Json(state.admin_service.get_question(QuestionId(id)).await?))
}

/// PATCH /admin/polls/questions/:id
pub async fn update_question(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<QuestionChanges>, JsonRejection>,
) -> Result<Json<Question>, AppError> {
    let Path(id) = path?;
    let Json(changes) = payload?;
    Ok(Json(
        state
            .admin_service
            .update_question(QuestionId(id), &changes)
            .await?,
    ))
}

/// DELETE /admin/polls/questions/:id
pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.admin_service.delete_question(QuestionId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Choice list query params
#[derive(Debug, Deserialize)]
pub struct ChoiceListParams {
    pub question: Option<i32>,
}

/// Add form for a single choice
#[derive(Debug, Deserialize)]
pub struct ChoiceAddForm {
    pub question: i32,
    pub choice_text: String,
    #[serde(default)]
    pub votes: i32,
}

/// GET /admin/polls/choices?question=
pub async fn list_choices(
    State(state): State<AppState>,
    params: Result<Query<ChoiceListParams>, QueryRejection>,
) -> Result<Json<Vec<Choice>>, AppError> {
    let Query(params) = params?;
    let choices = state
        .admin_service
        .list_choices(params.question.map(QuestionId))
        .await?;
    Ok(Json(choices))
}

/// POST /admin/polls/choices
pub async fn create_choice(
    State(state): State<AppState>,
    payload: Result<Json<ChoiceAddForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Choice>), AppError> {
    let Json(form) = payload?;
    let choice = NewChoice::new(form.choice_text).with_votes(form.votes);
    let created = state
        .admin_service
        .add_choice(QuestionId(form.question), &choice)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /admin/polls/choices/:id
pub async fn get_choice(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Choice>, AppError> {
    let Path(id) = path?;
    Ok(Json(state.admin_service.get_choice(ChoiceId(id)).await?))
}

/// PATCH /admin/polls/choices/:id
pub async fn update_choice(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ChoiceChanges>, JsonRejection>,
) -> Result<Json<Choice>, AppError> {
    let Path(id) = path?;
    let Json(changes) = payload?;
    Ok(Json(
        state
            .admin_service
            .update_choice(ChoiceId(id), &changes)
            .await?,
    ))
}

/// DELETE /admin/polls/choices/:id
pub async fn delete_choice(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.admin_service.delete_choice(ChoiceId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
