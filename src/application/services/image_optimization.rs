//! Format-optimized image resolution with an original and fallback chain.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{ImageFormat, OptimizeOptions};

use super::asset_manager::AssetManager;

/// Quality hint sent along with optimized requests.
pub const OPTIMIZED_QUALITY: u8 = 85;

/// Which link of the chain ended up displayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    /// The modern-format sibling loaded.
    Optimized(String),
    /// The original URL loaded.
    Original(String),
    /// Neither loaded; the configured fallback is shown.
    Fallback(String),
    /// Nothing displayable and no fallback configured.
    Unavailable,
}

impl ResolvedImage {
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Optimized(src) | Self::Original(src) | Self::Fallback(src) => Some(src),
            Self::Unavailable => None,
        }
    }

    #[must_use]
    pub const fn is_optimized(&self) -> bool {
        matches!(self, Self::Optimized(_))
    }

    #[must_use]
    pub const fn has_error(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// True when the requested image itself, in any format, is shown.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Optimized(_) | Self::Original(_))
    }
}

/// Resolves an image through optimized -> original -> fallback, consulting
/// and updating the asset manager's bookkeeping.
#[derive(Debug, Clone)]
pub struct ImageOptimizer {
    manager: Arc<AssetManager>,
    format: ImageFormat,
}

impl ImageOptimizer {
    #[must_use]
    pub fn new(manager: Arc<AssetManager>) -> Self {
        Self {
            manager,
            format: ImageFormat::Webp,
        }
    }

    #[must_use]
    pub const fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Walks the chain for `original`.
    ///
    /// Originals already known to load are returned without a fetch. Known
    /// failures skip straight to `fallback`. An original that fails here is
    /// reported to the asset manager so later lookups skip it.
    pub async fn resolve(&self, original: &str, fallback: Option<&str>) -> ResolvedImage {
        if self.manager.is_asset_loaded(original) {
            return ResolvedImage::Original(original.to_string());
        }

        if self.manager.is_asset_failed(original) {
            debug!(url = %original, "Asset previously failed, using fallback");
            return Self::fallback_or_unavailable(fallback);
        }

        let preloader = self.manager.preloader();
        let optimized = self.manager.optimized_image_url(
            original,
            OptimizeOptions::with_format(self.format).quality(OPTIMIZED_QUALITY),
        );

        if optimized != original {
            match preloader.preload(&optimized).await {
                Ok(()) => return ResolvedImage::Optimized(optimized),
                Err(e) => debug!(url = %optimized, error = %e, "Optimized image failed, trying original"),
            }
        }

        match preloader.preload(original).await {
            Ok(()) => ResolvedImage::Original(original.to_string()),
            Err(e) => {
                warn!(url = %original, error = %e, "Image failed to load");
                self.manager.mark_asset_failed(original);
                Self::fallback_or_unavailable(fallback)
            }
        }
    }

    fn fallback_or_unavailable(fallback: Option<&str>) -> ResolvedImage {
        fallback.map_or(ResolvedImage::Unavailable, |src| {
            ResolvedImage::Fallback(src.to_string())
        })
    }
}
