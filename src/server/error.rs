use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every failure a handler can report. Storage errors keep their cause, the
/// HTTP status depends on whether they happened on a read or a write path.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error("storage read failed")]
    ReadFailed(#[source] sqlx::Error),
    #[error("storage write failed")]
    WriteFailed(#[source] sqlx::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound | ApiError::ReadFailed(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) | ApiError::WriteFailed(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(status: StatusCode) -> &'static str {
        match status {
            StatusCode::BAD_REQUEST => "Bad Request",
            StatusCode::NOT_FOUND => "Resource not found",
            StatusCode::METHOD_NOT_ALLOWED => "Method not Allowed",
            StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable",
            _ => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ReadFailed(e) | ApiError::WriteFailed(e) => {
                tracing::warn!(error = %e, "{self}")
            }
            ApiError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::debug!("{other}"),
        }
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: ApiError::message(status),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::Unprocessable(e.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

// non-numeric ids simply don't name a resource
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Tags a storage result with the path it was produced on.
pub trait StorageResultExt<T> {
    fn on_read(self) -> Result<T, ApiError>;
    fn on_write(self) -> Result<T, ApiError>;
}

impl<T> StorageResultExt<T> for Result<T, sqlx::Error> {
    fn on_read(self) -> Result<T, ApiError> {
        self.map_err(ApiError::ReadFailed)
    }

    fn on_write(self) -> Result<T, ApiError> {
        self.map_err(ApiError::WriteFailed)
    }
}
