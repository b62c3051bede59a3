//! Inline SVG placeholders for loading and error states.
//!
//! Every function here is pure: identical options always produce the same
//! data URL, byte for byte.

use std::fmt::Write as _;
use std::sync::LazyLock;

use base64::{Engine as _, engine::general_purpose};

use super::markup::escape_markup;

const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Visual style of a placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlaceholderVariant {
    /// Flat background with centered text.
    Plain,
    /// Blurred diagonal gradient, no text.
    Blurred,
    /// Dark gradient with neon frame, glowing text and pulsing dots.
    #[default]
    Cyberpunk,
}

/// Placeholder options. Unset fields fall back to fixed defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub text: Option<String>,
    pub font_size: Option<u32>,
}

impl PlaceholderOptions {
    #[must_use]
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    fn width(&self) -> u32 {
        self.width.unwrap_or(320)
    }

    fn height(&self) -> u32 {
        self.height.unwrap_or(240)
    }

    fn text(&self) -> String {
        escape_markup(self.text.as_deref().unwrap_or("Loading..."))
    }
}

pub struct PlaceholderGenerator;

impl PlaceholderGenerator {
    /// Flat placeholder with centered text.
    #[must_use]
    pub fn plain(options: &PlaceholderOptions) -> String {
        let background = options.background_color.as_deref().unwrap_or("#333333");
        let text_color = options.text_color.as_deref().unwrap_or("#999999");
        let font_size = options.font_size.unwrap_or(14);

        let svg = format!(
            r#"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg"><rect width="100%" height="100%" fill="{background}"/><text x="50%" y="50%" font-family="Arial, sans-serif" font-size="{font_size}" fill="{text_color}" text-anchor="middle" dy=".3em">{text}</text></svg>"#,
            w = options.width(),
            h = options.height(),
            text = options.text(),
        );
        encode(&svg)
    }

    /// Blurred gradient placeholder. Ignores the text options.
    #[must_use]
    pub fn blurred(options: &PlaceholderOptions) -> String {
        let background = options.background_color.as_deref().unwrap_or("#1a1a1a");

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            options.width(),
            options.height()
        );
        let _ = write!(
            svg,
            r#"<defs><linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%"><stop offset="0%" style="stop-color:{background};stop-opacity:1" /><stop offset="50%" style="stop-color:#2a2a2a;stop-opacity:1" /><stop offset="100%" style="stop-color:{background};stop-opacity:1" /></linearGradient><filter id="blur"><feGaussianBlur stdDeviation="3"/></filter></defs>"#
        );
        svg.push_str(r#"<rect width="100%" height="100%" fill="url(#grad)" filter="url(#blur)"/></svg>"#);
        encode(&svg)
    }

    /// Decorative neon placeholder. Uses only size and text.
    #[must_use]
    pub fn cyberpunk(options: &PlaceholderOptions) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            options.width(),
            options.height()
        );
        svg.push_str(
            r##"<defs><linearGradient id="cyberpunk" x1="0%" y1="0%" x2="100%" y2="100%"><stop offset="0%" style="stop-color:#0a0a0a;stop-opacity:1" /><stop offset="50%" style="stop-color:#1a1a1a;stop-opacity:1" /><stop offset="100%" style="stop-color:#0a0a0a;stop-opacity:1" /></linearGradient><filter id="glow"><feGaussianBlur stdDeviation="2" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter></defs>"##,
        );
        svg.push_str(r##"<rect width="100%" height="100%" fill="url(#cyberpunk)"/>"##);
        svg.push_str(
            r##"<rect x="10%" y="10%" width="80%" height="80%" fill="none" stroke="#00ffff" stroke-width="1" opacity="0.3"/>"##,
        );
        let _ = write!(
            svg,
            r##"<text x="50%" y="50%" font-family="monospace" font-size="12" fill="#00ffff" text-anchor="middle" dy=".3em" filter="url(#glow)">{}</text>"##,
            options.text()
        );
        svg.push_str(
            r##"<circle cx="20%" cy="20%" r="2" fill="#ff00ff" opacity="0.6"><animate attributeName="opacity" values="0.6;1;0.6" dur="2s" repeatCount="indefinite"/></circle>"##,
        );
        svg.push_str(
            r##"<circle cx="80%" cy="80%" r="2" fill="#00ff00" opacity="0.6"><animate attributeName="opacity" values="1;0.6;1" dur="2s" repeatCount="indefinite"/></circle>"##,
        );
        svg.push_str("</svg>");
        encode(&svg)
    }

    /// Dispatches on the variant.
    #[must_use]
    pub fn generate(variant: PlaceholderVariant, options: &PlaceholderOptions) -> String {
        match variant {
            PlaceholderVariant::Plain => Self::plain(options),
            PlaceholderVariant::Blurred => Self::blurred(options),
            PlaceholderVariant::Cyberpunk => Self::cyberpunk(options),
        }
    }
}

fn encode(svg: &str) -> String {
    let mut out = String::with_capacity(SVG_DATA_URL_PREFIX.len() + svg.len() * 4 / 3 + 4);
    out.push_str(SVG_DATA_URL_PREFIX);
    general_purpose::STANDARD.encode_string(svg, &mut out);
    out
}

pub static PROFILE: LazyLock<String> = LazyLock::new(|| {
    PlaceholderGenerator::cyberpunk(&PlaceholderOptions::sized(320, 320).with_text("Profile"))
});

pub static ACHIEVEMENT: LazyLock<String> = LazyLock::new(|| {
    PlaceholderGenerator::cyberpunk(&PlaceholderOptions::sized(400, 300).with_text("Achievement"))
});

pub static PROJECT: LazyLock<String> = LazyLock::new(|| {
    PlaceholderGenerator::cyberpunk(&PlaceholderOptions::sized(600, 400).with_text("Project"))
});

pub static GENERIC: LazyLock<String> = LazyLock::new(|| {
    PlaceholderGenerator::cyberpunk(&PlaceholderOptions::sized(320, 240).with_text("Loading..."))
});
