//! Asset loading error types.

use thiserror::Error;

/// Result type for asset operations.
pub type AssetResult<T> = std::result::Result<T, AssetError>;

/// Asset loading error variants.
///
/// `Clone` so a single coalesced fetch result can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum AssetError {
    #[error("failed to preload image: {url}: {reason}")]
    PreloadFailed { url: String, reason: String },

    #[error("network error while fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("failed to decode image {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid asset url: {url}")]
    InvalidUrl { url: String },
}

impl AssetError {
    /// Creates preload failed error.
    #[must_use]
    pub fn preload_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PreloadFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates invalid url error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Returns the URL the error refers to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::PreloadFailed { url, .. }
            | Self::Network { url, .. }
            | Self::Decode { url, .. }
            | Self::InvalidUrl { url } => url,
        }
    }

    /// Returns whether a later attempt may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::PreloadFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_url() {
        let err = AssetError::preload_failed("/images/a.png", "HTTP 404");
        assert_eq!(
            err.to_string(),
            "failed to preload image: /images/a.png: HTTP 404"
        );
        assert_eq!(err.url(), "/images/a.png");
    }

    #[test]
    fn test_transient_classification() {
        assert!(AssetError::network("/a.png", "timeout").is_transient());
        assert!(!AssetError::decode("/a.png", "bad header").is_transient());
        assert!(!AssetError::invalid_url("::").is_transient());
    }
}
