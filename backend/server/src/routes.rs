use std::sync::Arc;

use axum::{
    Json,
    extract::{self, rejection::JsonRejection},
};
use contact::{ContactForm, ContactResponse, is_valid_email};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::{
    error::AppError,
    mailer::MailError,
    state::State,
    utils::build_notification,
};

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Health {
    status: &'static str,
    message: &'static str,
}

pub async fn health_handler() -> Json<Health> {
    Json(Health {
        status: "OK",
        message: "Portfolio server is running",
    })
}

pub async fn contact_handler(
    extract::State(state): extract::State<Arc<State>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    // Without a JSON content type the body reads as an empty form.
    let Json(form) = match payload {
        Ok(form) => form,
        Err(JsonRejection::MissingJsonContentType(_)) => Json(ContactForm::default()),
        Err(e) => {
            debug!("Rejected contact payload: {e}");
            return Err(AppError::MalformedPayload);
        }
    };

    let form = form.trimmed();

    if form.has_missing_field() {
        return Err(AppError::MissingFields);
    }

    if !is_valid_email(&form.email) {
        return Err(AppError::InvalidEmail);
    }

    let notification = build_notification(&state.config, &form);
    let limit = state.config.mail_timeout;

    let sent = match timeout(limit, state.mailer.send(notification)).await {
        Ok(result) => result,
        Err(_) => Err(MailError::Timeout(limit)),
    };

    if let Err(e) = sent {
        error!("Contact form error: {e}");
        return Err(AppError::SendFailed(e));
    }

    info!("Relayed contact message from {}", form.email);
    Ok(Json(ContactResponse::sent()))
}
