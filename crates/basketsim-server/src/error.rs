// HTTP error type: every failure leaves the API as `{"error": message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use basketsim_app::ServiceError;
use basketsim_core::LeagueError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InternalError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::League(e) if e.is_not_found() => ApiError::NotFound(e.to_string()),
            ServiceError::League(e) if e.is_conflict() => ApiError::Conflict(e.to_string()),
            ServiceError::League(e) => ApiError::BadRequest(e.to_string()),
            ServiceError::Storage(e) => {
                error!("storage failure: {e:#}");
                ApiError::InternalError("internal server error".to_string())
            }
        }
    }
}

impl From<LeagueError> for ApiError {
    fn from(err: LeagueError) -> Self {
        ServiceError::League(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
