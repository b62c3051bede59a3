//! Image format support detection.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::entities::ImageFormat;
use crate::domain::ports::FormatSupportPort;

const ALL_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Webp,
    ImageFormat::Avif,
    ImageFormat::Jpg,
    ImageFormat::Png,
];

/// Reports the formats the host can decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatProbe {
    supported: HashSet<ImageFormat>,
}

impl FormatProbe {
    /// Probes the decoders compiled into this build.
    #[must_use]
    pub fn detect() -> Self {
        let probe = Self::with_formats(
            ALL_FORMATS
                .into_iter()
                .filter(|format| decoder_format(*format).reading_enabled()),
        );
        debug!(supported = ?probe.supported, "Probed image format support");
        probe
    }

    /// Uses a fixed list, for hosts whose capabilities are known up front.
    #[must_use]
    pub fn with_formats(formats: impl IntoIterator<Item = ImageFormat>) -> Self {
        Self {
            supported: formats.into_iter().collect(),
        }
    }

    /// Uses `configured` when present, otherwise probes.
    #[must_use]
    pub fn from_config(configured: Option<&[ImageFormat]>) -> Self {
        configured.map_or_else(Self::detect, |formats| {
            Self::with_formats(formats.iter().copied())
        })
    }
}

impl FormatSupportPort for FormatProbe {
    fn supports(&self, format: ImageFormat) -> bool {
        self.supported.contains(&format)
    }
}

const fn decoder_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Webp => image::ImageFormat::WebP,
        ImageFormat::Avif => image::ImageFormat::Avif,
        ImageFormat::Jpg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_enabled_decoders() {
        let probe = FormatProbe::detect();
        assert!(probe.supports(ImageFormat::Png));
        assert!(probe.supports(ImageFormat::Jpg));
        assert!(probe.supports(ImageFormat::Webp));
        assert!(!probe.supports(ImageFormat::Avif));
    }

    #[test]
    fn test_configured_formats_override_probe() {
        let probe = FormatProbe::from_config(Some(&[ImageFormat::Avif]));
        assert!(probe.supports(ImageFormat::Avif));
        assert!(!probe.supports(ImageFormat::Webp));
    }
}
