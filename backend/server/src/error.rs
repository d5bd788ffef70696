use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contact::{ContactResponse, FIELDS_REQUIRED, INVALID_EMAIL, SEND_FAILED};
use thiserror::Error;

use crate::mailer::MailError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", FIELDS_REQUIRED)]
    MissingFields,

    #[error("{}", INVALID_EMAIL)]
    InvalidEmail,

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Failed to send message: {0}")]
    SendFailed(#[from] MailError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingFields | AppError::InvalidEmail | AppError::MalformedPayload => {
                StatusCode::BAD_REQUEST
            }
            AppError::SendFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Provider details stay in the logs.
        let message = match self {
            AppError::SendFailed(_) => SEND_FAILED.to_string(),
            other => other.to_string(),
        };

        (status, Json(ContactResponse::failure(message))).into_response()
    }
}
