//! # Mailer
//!
//! Outbound side of the relay. The route only knows the [`Mailer`] trait so the
//! SMTP provider can be swapped for a scripted one in tests.
//!
//! ## Notes
//! - One SMTP transport is built at startup and shared by every request.
//! - The transport's own timeout is set to the configured mail timeout, the
//!   route additionally bounds the whole send with the same value.
use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Mail provider did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(credentials)
            .timeout(Some(config.mail_timeout))
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: Notification) -> Result<(), MailError> {
        let message = Message::builder()
            .from(notification.from.parse::<Mailbox>()?)
            .to(notification.to.parse::<Mailbox>()?)
            .subject(notification.subject)
            .header(ContentType::TEXT_HTML)
            .body(notification.html)?;

        self.transport.send(message).await?;

        Ok(())
    }
}
