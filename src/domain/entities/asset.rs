//! Asset domain types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Image encodings an optimized URL can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// WebP.
    Webp,
    /// AVIF.
    Avif,
    /// JPEG.
    Jpg,
    /// PNG.
    Png,
}

impl ImageFormat {
    /// File extension used for sibling files of this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Avif => "avif",
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }

    /// Returns true for the modern formats the URL rewrite is allowed to produce.
    #[must_use]
    pub const fn is_modern(self) -> bool {
        matches!(self, Self::Webp | Self::Avif)
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Options accepted by the optimized-URL rewrite.
///
/// Only `format` affects the result today; the size and quality hints are kept
/// so callers can describe what they want once an image service sits in front
/// of the static origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Requested width in pixels.
    pub width: Option<u32>,
    /// Requested height in pixels.
    pub height: Option<u32>,
    /// Requested quality, 0-100.
    pub quality: Option<u8>,
    /// Requested encoding.
    pub format: Option<ImageFormat>,
}

impl OptimizeOptions {
    /// Options requesting a specific format.
    #[must_use]
    pub const fn with_format(format: ImageFormat) -> Self {
        Self {
            width: None,
            height: None,
            quality: None,
            format: Some(format),
        }
    }

    /// Sets the quality hint.
    #[must_use]
    pub const fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// Key into the per-page asset table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    /// Creates a new page key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PageKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Static description of the site's assets: origins to warm up, images
/// needed above the fold and the per-page prefetch table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalog {
    /// External origins that get a preconnect hint at startup.
    #[serde(default)]
    pub preconnect_origins: Vec<String>,
    /// Images preloaded unconditionally at startup.
    #[serde(default)]
    pub critical_assets: Vec<String>,
    /// Images prefetched when a page is entered.
    #[serde(default)]
    pub page_assets: BTreeMap<PageKey, Vec<String>>,
}

impl AssetCatalog {
    /// Assets registered for `page`. Empty for unknown pages.
    #[must_use]
    pub fn assets_for(&self, page: &PageKey) -> &[String] {
        self.page_assets.get(page).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        let mut page_assets = BTreeMap::new();
        page_assets.insert(
            PageKey::new("about"),
            vec!["/images/download.png".to_string()],
        );
        page_assets.insert(
            PageKey::new("achievements"),
            (1..=7)
                .map(|n| format!("/images/achievement{n}.jpg"))
                .collect(),
        );

        Self {
            preconnect_origins: vec!["https://www.transparenttextures.com".to_string()],
            critical_assets: vec!["/images/download.png".to_string()],
            page_assets,
        }
    }
}

/// Snapshot of the image preloader caches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreloaderStats {
    /// Number of URLs in the loaded set.
    pub preloaded_count: usize,
    /// Number of fetches currently in flight.
    pub pending_count: usize,
    /// Loaded URLs, sorted.
    pub preloaded_images: Vec<String>,
}

/// Snapshot of the asset manager state, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetStats {
    /// Number of assets confirmed displayable.
    pub loaded: usize,
    /// Number of assets confirmed unloadable.
    pub failed: usize,
    /// Loaded URLs, sorted.
    pub loaded_assets: Vec<String>,
    /// Failed URLs, sorted.
    pub failed_assets: Vec<String>,
    /// Preloader caches.
    pub preloader: PreloaderStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lists_achievement_images() {
        let catalog = AssetCatalog::default();
        let assets = catalog.assets_for(&PageKey::new("achievements"));
        assert_eq!(assets.len(), 7);
        assert_eq!(assets[0], "/images/achievement1.jpg");
        assert_eq!(assets[6], "/images/achievement7.jpg");
    }

    #[test]
    fn test_unknown_page_has_no_assets() {
        let catalog = AssetCatalog::default();
        assert!(catalog.assets_for(&PageKey::new("skills")).is_empty());
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ImageFormat::Webp.extension(), "webp");
        assert_eq!(ImageFormat::Avif.to_string(), "avif");
        assert!(ImageFormat::Avif.is_modern());
        assert!(!ImageFormat::Png.is_modern());
    }
}
