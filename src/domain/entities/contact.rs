//! Contact form submitted from the contact page.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::FieldError;

/// Shortest message accepted, counted after trimming.
pub const MIN_MESSAGE_LEN: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex is valid"));

/// Visitor message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Message body.
    pub message: String,
}

impl ContactForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Checks every field and reports all problems at once, in field order.
    ///
    /// # Errors
    /// Returns the list of field errors when any field is invalid.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::NameRequired);
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::EmailRequired);
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::InvalidEmail);
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.push(FieldError::MessageRequired);
        } else if message.chars().count() < MIN_MESSAGE_LEN {
            errors.push(FieldError::MessageTooShort {
                min: MIN_MESSAGE_LEN,
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Loose `local@domain.tld` check without whitespace.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
