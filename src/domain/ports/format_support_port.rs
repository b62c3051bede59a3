//! Port for host image decoding capabilities.

use crate::domain::entities::ImageFormat;

/// Answers whether the host can decode an image format.
#[cfg_attr(test, mockall::automock)]
pub trait FormatSupportPort: Send + Sync {
    /// Returns true if images of `format` can be displayed.
    fn supports(&self, format: ImageFormat) -> bool;
}
