/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Error as AnyhowError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::fmt;
use worktable_core::input::InputError;
use worktable_core::workflow::WorkflowError;

#[derive(Debug)]
pub enum WebError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    UnprocessableEntity(String),
    InternalServerError(String),
    Database(DbErr),
    Validation(String),
    InputValidation(InputError),
    JsonParsing(JsonRejection),
    Internal(AnyhowError),
}

/// Validation failures carry a list, everything else a single string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: ErrorMessage,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            WebError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            WebError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            WebError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            WebError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            WebError::UnprocessableEntity(msg) => write!(f, "Unprocessable Entity: {}", msg),
            WebError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            WebError::Database(err) => write!(f, "Database error: {}", err),
            WebError::Validation(msg) => write!(f, "Validation error: {}", msg),
            WebError::InputValidation(err) => write!(f, "Input validation error: {}", err),
            WebError::JsonParsing(err) => write!(f, "JSON parsing error: {}", err),
            WebError::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebError::Database(err) => Some(err),
            WebError::InputValidation(err) => Some(err),
            WebError::JsonParsing(err) => Some(err),
            WebError::Internal(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<DbErr> for WebError {
    fn from(err: DbErr) -> Self {
        WebError::Database(err)
    }
}

impl From<InputError> for WebError {
    fn from(err: InputError) -> Self {
        WebError::InputValidation(err)
    }
}

impl From<JsonRejection> for WebError {
    fn from(err: JsonRejection) -> Self {
        WebError::JsonParsing(err)
    }
}

impl From<AnyhowError> for WebError {
    fn from(err: AnyhowError) -> Self {
        WebError::Internal(err)
    }
}

impl From<WorkflowError> for WebError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::JobNotFound => WebError::not_found("Job"),
            WorkflowError::StatusNotFound => WebError::not_found("Job status"),
            WorkflowError::MemberNotFound => WebError::not_found("Member"),
            WorkflowError::TransitionNotFound => WebError::not_found("Transition"),
            WorkflowError::StaleStatus => WebError::Conflict(err.to_string()),
            WorkflowError::TransitionExists => WebError::already_exists("Transition"),
            WorkflowError::TransitionNotAllowed => WebError::UnprocessableEntity(err.to_string()),
            WorkflowError::Invalid(msg) => WebError::Validation(msg),
            WorkflowError::Database(err) => WebError::Database(err),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorMessage::Single(msg)),
            WebError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorMessage::Single(msg)),
            WebError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorMessage::Single(msg)),
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorMessage::Single(msg)),
            WebError::Conflict(msg) => (StatusCode::CONFLICT, ErrorMessage::Single(msg)),
            WebError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorMessage::Single(msg))
            }
            WebError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorMessage::Single(msg))
            }
            WebError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorMessage::Single("Database error".to_string()),
                )
            }
            WebError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorMessage::Many(vec![msg])),
            WebError::InputValidation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorMessage::Many(vec![err.to_string()]),
            ),
            WebError::JsonParsing(err) => (
                StatusCode::BAD_REQUEST,
                ErrorMessage::Many(vec![err.body_text()]),
            ),
            WebError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorMessage::Single("Internal server error".to_string()),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            timestamp: Utc::now(),
        });

        (status, body).into_response()
    }
}

pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    pub fn already_exists(resource: &str) -> Self {
        WebError::Conflict(format!("{} already exists", resource))
    }

    pub fn not_found(resource: &str) -> Self {
        WebError::NotFound(format!("{} not found", resource))
    }

    pub fn invalid_credentials() -> Self {
        WebError::Unauthorized("Invalid credentials".to_string())
    }

    pub fn registration_disabled() -> Self {
        WebError::BadRequest("Registration is disabled".to_string())
    }

    pub fn failed_to_generate_token() -> Self {
        WebError::InternalServerError("Failed to generate token".to_string())
    }

    pub fn managed_resource(resource: &str) -> Self {
        WebError::Forbidden(format!("{} is managed by the state file", resource))
    }

    pub fn missing_permission() -> Self {
        WebError::Forbidden("Insufficient permissions".to_string())
    }

    /// `field` names the first failing field of the body.
    pub fn invalid_field(field: &str, reason: String) -> Self {
        WebError::InputValidation(InputError::new(field, reason))
    }
}

/// `Json` extractor whose rejection uses the error envelope.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ValidJson(value))
    }
}
