//! Unified error types for the polls API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)
//! - `FormErrors`: Field-level errors reported back by admin forms

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

/// Errors collected while validating an admin form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormErrors {
    /// Errors not tied to a single field (e.g. too few inline choices)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub non_field_errors: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.non_field_errors.is_empty() && self.fields.is_empty()
    }

    /// `Ok(())` when nothing was collected, otherwise the errors themselves
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut messages: Vec<String> = self.non_field_errors.clone();
        for (field, errors) in &self.fields {
            for error in errors {
                messages.push(format!("{}: {}", field, error));
            }
        }
        write!(f, "{}", messages.join("; "))
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid form: {0}")]
    Form(FormErrors),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::Form(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// An id segment that does not parse cannot name an existing row
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Domain(DomainError::NotFound(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FormErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut form_errors = None;
        let (status, error, details) = match &self {
            // Missing and not-yet-published look the same from outside
            AppError::Domain(DomainError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Not found", None)
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Form(errors) => {
                form_errors = Some(errors.clone());
                (StatusCode::UNPROCESSABLE_ENTITY, "Invalid form", None)
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
            errors: form_errors,
        });

        (status, body).into_response()
    }
}
