//! API error taxonomy and its JSON rendering.
//!
//! There is exactly one domain error kind per resource: "not found or not
//! owned". Absence and ownership mismatch are deliberately indistinguishable
//! so callers cannot probe for the existence of other users' resources. The
//! error code and message must stay byte-identical for both causes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use codeshot_storage::{PresetId, ProjectId, StoreError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Preset with id {id} for user {user_id} not found")]
    PresetNotFound { id: PresetId, user_id: UserId },

    #[error("Project with id {id} for user {user_id} not found")]
    ProjectNotFound { id: ProjectId, user_id: UserId },

    #[error("{0}")]
    Unauthenticated(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Machine-readable error code, rendered in the JSON body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::PresetNotFound { .. } => "NotFoundPresetException",
            ApiError::ProjectNotFound { .. } => "NotFoundProjectException",
            ApiError::Unauthenticated(_) => "UnauthorizedException",
            ApiError::Store(StoreError::AlreadyExists) => "ConflictException",
            ApiError::Store(_) => "InternalServerError",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::PresetNotFound { .. } | ApiError::ProjectNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Store(StoreError::AlreadyExists) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
