//! Contact form: inline validation and the submit round trip.
//!
//! Submission is split in two so the page keeps handling events while the
//! request is in flight: [`ContactSubmitter::begin`] validates and marks the
//! form busy, the host awaits [`Submission::send`], then hands the outcome to
//! [`ContactSubmitter::finish`].
use async_trait::async_trait;
use contact::{CONTACT_ENDPOINT, ContactForm, ContactResponse, Field, check_fields};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::effect::{Effect, Tone};

pub const SENDING: &str = "Sending message...";
pub const NETWORK_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Relay unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_contact(&self, form: &ContactForm) -> Result<ContactResponse, TransportError>;
}

/// Posts to the relay over HTTP. Any JSON reply is honored, whatever its status.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}{CONTACT_ENDPOINT}", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn post(&self, form: &ContactForm) -> Result<ContactResponse, TransportError> {
        let response = self.client.post(&self.url).json(form).send().await?;

        Ok(response.json::<ContactResponse>().await?)
    }
}

// Browser fetch futures are not `Send`, the wasm host calls `post` directly.
#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl Transport for HttpTransport {
    async fn post_contact(&self, form: &ContactForm) -> Result<ContactResponse, TransportError> {
        self.post(form).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<Field>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Clears every field's message, then sets one per failing field.
    pub fn effects(&self) -> Vec<Effect> {
        let cleared = Field::ALL.into_iter().map(|field| Effect::FieldError {
            field,
            message: None,
        });
        let failed = self.errors.iter().map(|&field| Effect::FieldError {
            field,
            message: Some(field.error_message()),
        });

        cleared.chain(failed).collect()
    }
}

pub fn validate(form: &ContactForm) -> Validation {
    Validation {
        errors: check_fields(&form.trimmed()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    form: ContactForm,
}

impl Submission {
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub async fn send<T: Transport + ?Sized>(
        &self,
        transport: &T,
    ) -> Result<ContactResponse, TransportError> {
        transport.post_contact(&self.form).await
    }
}

#[derive(Debug, Default)]
pub struct ContactSubmitter {
    busy: bool,
}

impl ContactSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// `None` when the form is invalid or a submission is already in flight.
    pub fn begin(&mut self, form: &ContactForm) -> (Option<Submission>, Vec<Effect>) {
        if self.busy {
            debug!("Contact form already submitting, ignoring submit");
            return (None, Vec::new());
        }

        let validation = validate(form);
        let mut effects = validation.effects();

        if !validation.is_valid() {
            return (None, effects);
        }

        self.busy = true;
        effects.push(Effect::Status {
            text: SENDING.to_string(),
            tone: Tone::Pending,
        });

        let submission = Submission {
            form: form.trimmed(),
        };

        (Some(submission), effects)
    }

    pub fn finish(&mut self, outcome: Result<ContactResponse, TransportError>) -> Vec<Effect> {
        self.busy = false;

        match outcome {
            Ok(reply) if reply.success => vec![
                Effect::Status {
                    text: reply.message,
                    tone: Tone::Success,
                },
                Effect::FormReset,
            ],
            Ok(reply) => vec![Effect::Status {
                text: reply.message,
                tone: Tone::Failure,
            }],
            Err(e) => {
                warn!("Contact submission failed: {e}");
                vec![Effect::Status {
                    text: NETWORK_FAILED.to_string(),
                    tone: Tone::Failure,
                }]
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use contact::{INVALID_EMAIL, SENT};

    use super::*;

    /// Replies with a fixed outcome and records what it was sent.
    pub(crate) struct FakeTransport {
        reply: Option<ContactResponse>,
        pub(crate) received: Mutex<Vec<ContactForm>>,
    }

    impl FakeTransport {
        pub(crate) fn replying(reply: ContactResponse) -> Self {
            Self {
                reply: Some(reply),
                received: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn offline() -> Self {
            Self {
                reply: None,
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn post_contact(
            &self,
            form: &ContactForm,
        ) -> Result<ContactResponse, TransportError> {
            self.received.lock().unwrap().push(form.clone());
            self.reply
                .clone()
                .ok_or_else(|| TransportError::Unavailable("offline".to_string()))
        }
    }

    fn errors_shown(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::FieldError { message: Some(_), .. }))
            .count()
    }

    fn valid_form() -> ContactForm {
        ContactForm::new("  Jo ", "jo@example.com ", "hi there", "hello world!")
    }

    #[test]
    fn test_empty_form_shows_four_errors() {
        let validation = validate(&ContactForm::default());

        assert!(!validation.is_valid());
        assert_eq!(errors_shown(&validation.effects()), 4);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let validation = validate(&ContactForm::new("   ", "  ", "   ", "          "));

        assert_eq!(validation.errors, Field::ALL.to_vec());
    }

    #[test]
    fn test_valid_form_shows_no_errors() {
        let effects = validate(&valid_form()).effects();

        assert_eq!(errors_shown(&effects), 0);
        assert_eq!(effects.len(), 4);
    }

    #[test]
    fn test_errors_cleared_before_set() {
        let form = ContactForm::new("Jo", "bad", "hi there", "hello world!");
        let effects = validate(&form).effects();

        assert_eq!(
            effects.last(),
            Some(&Effect::FieldError {
                field: Field::Email,
                message: Some("Please enter a valid email.")
            })
        );
        assert!(effects[..4]
            .iter()
            .all(|e| matches!(e, Effect::FieldError { message: None, .. })));
    }

    #[test]
    fn test_invalid_form_is_not_sent() {
        let mut submitter = ContactSubmitter::new();

        let (submission, effects) = submitter.begin(&ContactForm::default());

        assert!(submission.is_none());
        assert_eq!(errors_shown(&effects), 4);
        assert!(!submitter.is_busy());
    }

    #[tokio::test]
    async fn test_success_resets_form() {
        let transport = FakeTransport::replying(ContactResponse::sent());
        let mut submitter = ContactSubmitter::new();

        let (submission, effects) = submitter.begin(&valid_form());
        let submission = submission.unwrap();
        assert_eq!(
            effects.last(),
            Some(&Effect::Status {
                text: SENDING.to_string(),
                tone: Tone::Pending
            })
        );
        assert!(submitter.is_busy());

        let effects = submitter.finish(submission.send(&transport).await);

        assert_eq!(
            effects,
            vec![
                Effect::Status {
                    text: SENT.to_string(),
                    tone: Tone::Success
                },
                Effect::FormReset
            ]
        );
        assert!(!submitter.is_busy());
        assert_eq!(
            transport.received.lock().unwrap()[0],
            ContactForm::new("Jo", "jo@example.com", "hi there", "hello world!")
        );
    }

    #[tokio::test]
    async fn test_server_failure_message_is_shown() {
        let transport = FakeTransport::replying(ContactResponse::failure(INVALID_EMAIL));
        let mut submitter = ContactSubmitter::new();

        let (submission, _) = submitter.begin(&valid_form());
        let effects = submitter.finish(submission.unwrap().send(&transport).await);

        assert_eq!(
            effects,
            vec![Effect::Status {
                text: INVALID_EMAIL.to_string(),
                tone: Tone::Failure
            }]
        );
    }

    #[tokio::test]
    async fn test_network_failure_falls_back() {
        let transport = FakeTransport::offline();
        let mut submitter = ContactSubmitter::new();

        let (submission, _) = submitter.begin(&valid_form());
        let effects = submitter.finish(submission.unwrap().send(&transport).await);

        assert_eq!(
            effects,
            vec![Effect::Status {
                text: NETWORK_FAILED.to_string(),
                tone: Tone::Failure
            }]
        );
        assert!(!submitter.is_busy());
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut submitter = ContactSubmitter::new();

        let (first, _) = submitter.begin(&valid_form());
        let (second, effects) = submitter.begin(&valid_form());

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            HttpTransport::new("http://localhost:3001/").url(),
            "http://localhost:3001/api/contact"
        );
    }
}
