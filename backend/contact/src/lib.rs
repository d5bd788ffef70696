//! # Contact
//!
//! Payloads shared between the page, the relay and the tester.
//!
//! ## Wire format
//! - Request: JSON `{ name, email, subject, message }`, every field a string.
//!   Absent fields decode as empty strings so the relay can answer with its own
//!   "required" message instead of a decoder error.
//! - Response: JSON `{ success, message }`.
//!
//! ## Validation
//! The relay only checks presence and the email shape. The page additionally
//! enforces minimum lengths per field, see [`check_fields`].
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

pub const CONTACT_ENDPOINT: &str = "/api/contact";

pub const SENT: &str = "Message sent successfully!";
pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const SEND_FAILED: &str = "Failed to send message. Please try again later.";

pub const NAME_MIN: usize = 2;
pub const SUBJECT_MIN: usize = 3;
pub const MESSAGE_MIN: usize = 10;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContactForm {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

/// `null` reads as an empty field, like an absent one.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn trimmed(&self) -> Self {
        Self::new(
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.trim(),
        )
    }

    /// True when any field is empty after trimming.
    pub fn has_missing_field(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SENT.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Suffix of the inline error element, `error-<id>`.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Field::Name => "Please enter your full name.",
            Field::Email => "Please enter a valid email.",
            Field::Subject => "Subject is too short.",
            Field::Message => "Message should be at least 10 characters.",
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Checks every field of an already trimmed form, without short-circuiting.
pub fn check_fields(form: &ContactForm) -> Vec<Field> {
    let long_enough = |value: &str, min: usize| value.chars().count() >= min;

    Field::ALL
        .into_iter()
        .filter(|field| match field {
            Field::Name => !long_enough(&form.name, NAME_MIN),
            Field::Email => !is_valid_email(&form.email),
            Field::Subject => !long_enough(&form.subject, SUBJECT_MIN),
            Field::Message => !long_enough(&form.message, MESSAGE_MIN),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_all_fields_fail_on_empty_form() {
        let errors = check_fields(&ContactForm::default());

        assert_eq!(errors, Field::ALL.to_vec());
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let form = ContactForm::new("Jo", "jo@example.com", "hey", "0123456789");

        assert!(check_fields(&form).is_empty());
    }

    #[test]
    fn test_minimum_lengths() {
        let form = ContactForm::new("J", "jo@example.com", "hi", "too short");

        assert_eq!(
            check_fields(&form),
            vec![Field::Name, Field::Subject, Field::Message]
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        let form = ContactForm::new("Zoë", "zoe@example.com", "çà!", "ééééééééé");

        assert_eq!(check_fields(&form), vec![Field::Message]);
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let form = ContactForm::new("   ", "a@b.com", "hi there", "hello world!");

        assert!(form.has_missing_field());
        assert_eq!(form.trimmed().name, "");
    }

    #[test]
    fn test_null_fields_decode_empty() {
        let form: ContactForm = serde_json::from_str(
            r#"{"name":null,"email":"a@b.com","subject":"hi there","message":"hello world!"}"#,
        )
        .unwrap();

        assert!(form.name.is_empty());
        assert_eq!(form.subject, "hi there");
        assert!(form.has_missing_field());
    }

    #[test]
    fn test_absent_fields_decode_empty() {
        let form: ContactForm = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();

        assert_eq!(form.email, "a@b.com");
        assert!(form.name.is_empty());
        assert!(form.has_missing_field());
    }
}
