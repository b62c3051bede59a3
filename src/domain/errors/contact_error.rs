//! Contact form error types.

use thiserror::Error;

/// A single problem with a submitted contact form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Message is required")]
    MessageRequired,

    #[error("Message must be at least {min} characters long")]
    MessageTooShort { min: usize },
}

impl FieldError {
    /// Form field the error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::EmailRequired | Self::InvalidEmail => "email",
            Self::MessageRequired | Self::MessageTooShort { .. } => "message",
        }
    }
}

/// Contact submission error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ContactError {
    #[error("contact form is invalid ({} problem(s))", .errors.len())]
    Invalid { errors: Vec<FieldError> },

    #[error("email service is not configured")]
    NotConfigured,

    #[error("network error while sending email: {message}")]
    Network { message: String },

    #[error("email service returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected email service error: {message}")]
    Unexpected { message: String },
}

impl ContactError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates rejection error.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Field errors when the form failed validation.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid { errors } => errors,
            _ => &[],
        }
    }
}
