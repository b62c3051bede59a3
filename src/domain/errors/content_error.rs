//! Content API error types.

use thiserror::Error;

/// Content API error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ContentError {
    #[error("network error while calling content api: {message}")]
    Network { message: String },

    #[error("content api returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse content api response: {message}")]
    Parse { message: String },

    #[error("unexpected content api error: {message}")]
    Unexpected { message: String },
}

impl ContentError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
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

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
