use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::CoreError;
use reporter::{NOTHING_TO_EXPORT, ReportError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] CoreError),
    #[error("{}", NOTHING_TO_EXPORT)]
    NothingToExport,
    #[error("Report error: {0}")]
    Report(ReportError),
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NothingToExport => AppError::NothingToExport,
            other => AppError::Report(other),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidInput(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NothingToExport => (StatusCode::CONFLICT, NOTHING_TO_EXPORT.to_string()),
            AppError::Report(report_err) => {
                tracing::error!(error = ?report_err, "Report error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The report could not be generated".to_string(),
                )
            }
            AppError::Rejected { status, message } => (status, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
